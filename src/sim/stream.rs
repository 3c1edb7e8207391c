//! Endless tree streams
//!
//! Both tree layers are infinite in principle but stored as short sliding
//! windows: trees that scroll far enough off the left edge are dropped from
//! the head and a fresh one is grown at the tail, so the window length stays
//! constant no matter how far the balloon has flown.

use std::collections::VecDeque;

use rand::Rng;

use super::state::{BackgroundTree, Tree, TreeColor, Viewport};
use super::terrain::BACKGROUND_HILL;
use crate::consts::MAX_STREAM_TREES;
use crate::tuning::Tuning;

/// Anything that sits at a horizontal position in a stream
pub trait StreamItem {
    fn x(&self) -> f32;
}

impl StreamItem for Tree {
    fn x(&self) -> f32 {
        self.x
    }
}

impl StreamItem for BackgroundTree {
    fn x(&self) -> f32 {
        self.x
    }
}

/// Uniform value in `[min, max)`; `min` when the range is empty
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Whole-unit gap in `[min_gap, max_gap)`
#[inline]
fn gap<R: Rng + ?Sized>(rng: &mut R, min_gap: f32, max_gap: f32) -> f32 {
    min_gap + (rng.random::<f32>() * (max_gap - min_gap)).floor()
}

/// Grow one foreground tree at the tail and return it
pub fn extend_foreground<R: Rng + ?Sized>(
    trees: &mut VecDeque<Tree>,
    tuning: &Tuning,
    rng: &mut R,
) -> Tree {
    let x = match trees.back() {
        Some(tail) => tail.x + gap(rng, tuning.tree_min_gap, tuning.tree_max_gap),
        None => tuning.first_tree_x,
    };
    let height = uniform(rng, tuning.tree_min_height, tuning.tree_max_height);
    let radii = std::array::from_fn(|_| {
        uniform(rng, tuning.crown_min_radius, tuning.crown_max_radius)
    });
    let tree = Tree {
        x,
        height,
        radii,
        color: TreeColor::random(rng),
    };
    trees.push_back(tree);
    tree
}

/// Grow one background tree at the tail and return it
pub fn extend_background<R: Rng + ?Sized>(
    trees: &mut VecDeque<BackgroundTree>,
    tuning: &Tuning,
    rng: &mut R,
) -> BackgroundTree {
    let furthest = trees.back().map_or(0.0, |tail| tail.x);
    let tree = BackgroundTree {
        x: furthest + gap(rng, tuning.background_min_gap, tuning.background_max_gap),
        color: TreeColor::random(rng),
    };
    trees.push_back(tree);
    tree
}

/// True once `x` is more than `margin` behind the left screen edge
#[inline]
pub fn is_behind(x: f32, scroll_x: f32, view_offset: f32, margin: f32) -> bool {
    x - (scroll_x - view_offset) < -margin
}

/// Drop the head if it has scrolled out of view; returns the dropped item
pub fn trim<T: StreamItem>(
    items: &mut VecDeque<T>,
    scroll_x: f32,
    view_offset: f32,
    margin: f32,
) -> Option<T> {
    let head = items.front()?;
    if is_behind(head.x(), scroll_x, view_offset, margin) {
        items.pop_front()
    } else {
        None
    }
}

/// Swap every off-screen foreground tree for a new one at the tail.
/// Returns how many were recycled; the window length is unchanged.
/// Terminates because every new tail is at least one minimum gap further on.
pub fn recycle_foreground<R: Rng + ?Sized>(
    trees: &mut VecDeque<Tree>,
    vehicle_x: f32,
    viewport: &Viewport,
    tuning: &Tuning,
    rng: &mut R,
) -> usize {
    let offset = viewport.horizontal_padding();
    let margin = tuning.tree_trim_margin;
    let mut recycled = 0;
    while trees
        .front()
        .is_some_and(|head| is_behind(head.x, vehicle_x, offset, margin))
    {
        // Grow before dropping so a one-tree window continues from its tail
        let new = extend_foreground(trees, tuning, rng);
        if let Some(old) = trim(trees, vehicle_x, offset, margin) {
            log::debug!("Recycled tree at x={} -> x={}", old.x, new.x);
        }
        recycled += 1;
    }
    recycled
}

/// Same as `recycle_foreground`, but the hill scrolls at parallax speed
pub fn recycle_background<R: Rng + ?Sized>(
    trees: &mut VecDeque<BackgroundTree>,
    vehicle_x: f32,
    viewport: &Viewport,
    tuning: &Tuning,
    rng: &mut R,
) -> usize {
    let scroll_x = vehicle_x * BACKGROUND_HILL.speed;
    let offset = viewport.horizontal_padding();
    let margin = tuning.background_trim_margin;
    let mut recycled = 0;
    while trees
        .front()
        .is_some_and(|head| is_behind(head.x, scroll_x, offset, margin))
    {
        extend_background(trees, tuning, rng);
        trim(trees, scroll_x, offset, margin);
        recycled += 1;
    }
    recycled
}

/// Right edge of the visible window in foreground world space
pub fn foreground_view_end(vehicle_x: f32, viewport: &Viewport) -> f32 {
    vehicle_x - viewport.horizontal_padding() + viewport.width
}

/// Right edge of the visible window in background hill space
pub fn background_view_end(vehicle_x: f32, viewport: &Viewport) -> f32 {
    vehicle_x * BACKGROUND_HILL.speed + viewport.width
}

/// Extend until some foreground tree lies past `view_end`
pub fn fill_foreground<R: Rng + ?Sized>(
    trees: &mut VecDeque<Tree>,
    view_end: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> usize {
    let mut added = 0;
    while trees.back().is_none_or(|tail| tail.x <= view_end) {
        if trees.len() >= MAX_STREAM_TREES {
            log::warn!("foreground stream is full at {} trees", trees.len());
            break;
        }
        extend_foreground(trees, tuning, rng);
        added += 1;
    }
    added
}

/// Extend until some background tree lies past `view_end`
pub fn fill_background<R: Rng + ?Sized>(
    trees: &mut VecDeque<BackgroundTree>,
    view_end: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> usize {
    let mut added = 0;
    while trees.back().is_none_or(|tail| tail.x <= view_end) {
        if trees.len() >= MAX_STREAM_TREES {
            log::warn!("background stream is full at {} trees", trees.len());
            break;
        }
        extend_background(trees, tuning, rng);
        added += 1;
    }
    added
}

/// Number of trees laid out at reset: one per `spacing` of screen width,
/// counting from 1, but never zero and never past the stream limit
pub fn initial_count(width: f32, spacing: f32) -> usize {
    ((width / spacing).ceil() as usize)
        .saturating_sub(1)
        .clamp(1, MAX_STREAM_TREES)
}

/// Regrow both streams from scratch for a fresh run
pub fn populate<R: Rng + ?Sized>(
    trees: &mut VecDeque<Tree>,
    background: &mut VecDeque<BackgroundTree>,
    viewport: &Viewport,
    tuning: &Tuning,
    rng: &mut R,
) {
    trees.clear();
    for _ in 0..initial_count(viewport.width, tuning.tree_spacing) {
        extend_foreground(trees, tuning, rng);
    }
    fill_foreground(trees, foreground_view_end(0.0, viewport), tuning, rng);

    background.clear();
    for _ in 0..initial_count(viewport.width, tuning.background_spacing) {
        extend_background(background, tuning, rng);
    }
    fill_background(background, background_view_end(0.0, viewport), tuning, rng);
}
