//! Rolling hills behind the forest
//!
//! Each hill is a stretched sine wave (in degrees) that scrolls slower than
//! the foreground. Heights are relative to the ground line, negative is up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::BackgroundTree;
use crate::sin_degrees;

/// One parallax hill layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HillLayer {
    pub base_height: f32,
    /// Scroll rate relative to the balloon
    pub speed: f32,
    pub amplitude: f32,
    /// Horizontal stretch of the sine wave
    pub stretch: f32,
}

/// Far hill carrying the background trees
pub const BACKGROUND_HILL: HillLayer = HillLayer {
    base_height: 80.0,
    speed: 0.2,
    amplitude: 10.0,
    stretch: 1.0,
};

pub const MIDDLE_HILL: HillLayer = HillLayer {
    base_height: 50.0,
    speed: 0.2,
    amplitude: 15.0,
    stretch: 0.5,
};

pub const NEAR_HILL: HillLayer = HillLayer {
    base_height: 15.0,
    speed: 1.0,
    amplitude: 10.0,
    stretch: 0.2,
};

/// Back to front
pub const HILL_LAYERS: [HillLayer; 3] = [BACKGROUND_HILL, MIDDLE_HILL, NEAR_HILL];

impl HillLayer {
    /// Hill surface height at a screen column for the current scroll
    pub fn y_at(&self, vehicle_x: f32, screen_x: f32) -> f32 {
        sin_degrees((vehicle_x * self.speed + screen_x) * self.stretch) * self.amplitude
            - self.base_height
    }

    /// Ground height under a background tree. The tree keeps its own spot on
    /// the wave, so it bobs slightly against the scrolling hill.
    pub fn tree_y(&self, tree_x: f32) -> f32 {
        sin_degrees(tree_x) * self.amplitude - self.base_height
    }

    /// Screen position of a background tree planted on this hill
    pub fn tree_position(&self, tree: &BackgroundTree, vehicle_x: f32) -> Vec2 {
        Vec2::new(
            (tree.x - vehicle_x * self.speed) * self.stretch,
            self.tree_y(tree.x),
        )
    }
}
