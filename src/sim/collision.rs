//! Cart versus tree-crown hit testing
//!
//! The cart is approximated by three corner points and each crown by circles.
//! A hit is any corner strictly inside any checked circle. Only the left and
//! top clusters of a crown are checked, and the cart's top-left corner is
//! never tested; both match how the game has always played.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EndReason, Tree, VehicleState};
use crate::consts::*;

/// A crown cluster in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) < self.radius
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }
}

/// Bottom-left, bottom-right and top-right corners of the cart
pub fn cart_hit_points(pos: Vec2) -> [Vec2; 3] {
    [
        Vec2::new(pos.x - CART_HALF_WIDTH, pos.y),
        Vec2::new(pos.x + CART_HALF_WIDTH, pos.y),
        Vec2::new(pos.x + CART_HALF_WIDTH, pos.y - CART_HEIGHT),
    ]
}

/// Crown clusters that take part in hit testing
pub fn checked_crown_circles(tree: &Tree) -> impl Iterator<Item = Circle> {
    tree.crown_circles()
        .into_iter()
        .take(CHECKED_CROWN_CLUSTERS)
}

/// True if any point lies strictly inside any circle
pub fn points_hit_circles(points: &[Vec2], circles: impl IntoIterator<Item = Circle>) -> bool {
    circles
        .into_iter()
        .any(|circle| points.iter().any(|&p| circle.contains(p)))
}

/// Check the cart at `pos` against one tree
pub fn tree_hit(tree: &Tree, pos: Vec2) -> bool {
    points_hit_circles(&cart_hit_points(pos), checked_crown_circles(tree))
}

/// Check the balloon against every tree in the window
pub fn detect<'a>(vehicle: &VehicleState, trees: impl IntoIterator<Item = &'a Tree>) -> bool {
    let points = cart_hit_points(vehicle.pos);
    trees
        .into_iter()
        .any(|tree| points_hit_circles(&points, checked_crown_circles(tree)))
}

/// Decide whether the run is over after a tick
pub fn end_condition(vehicle: &VehicleState, hit: bool) -> Option<EndReason> {
    if hit {
        Some(EndReason::Crashed)
    } else if vehicle.fuel <= 0.0 && vehicle.is_grounded() {
        Some(EndReason::OutOfFuel)
    } else {
        None
    }
}
