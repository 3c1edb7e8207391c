//! Balloon Drift - a hot-air balloon arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balloon physics, tree streams, collisions)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser facade (wasm32 only)
//! - `error`: Invalid-argument errors raised by constructors

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Centered play area the camera keeps the balloon in
    pub const MAIN_AREA_WIDTH: f32 = 400.0;
    pub const MAIN_AREA_HEIGHT: f32 = 375.0;

    /// Cart hitbox, relative to the balloon anchor (bottom center of the cart)
    pub const CART_HALF_WIDTH: f32 = 30.0;
    pub const CART_HEIGHT: f32 = 40.0;

    /// Crown cluster offsets from the top of the trunk, in drawing order:
    /// bottom-left, left, top-left, top, top-right, right, bottom-right
    pub const CROWN_OFFSETS: [(f32, f32); 7] = [
        (-20.0, -15.0),
        (-30.0, -25.0),
        (-20.0, -35.0),
        (0.0, -45.0),
        (20.0, -35.0),
        (30.0, -25.0),
        (20.0, -15.0),
    ];
    /// Only the first five clusters are hit-tested
    pub const CHECKED_CROWN_CLUSTERS: usize = 5;

    /// Distance units per displayed meter
    pub const UNITS_PER_METER: f32 = 30.0;

    /// Fuel level at which the gauge turns red
    pub const FUEL_WARNING_LEVEL: f32 = 30.0;

    /// Widest screen the forest is laid out for
    pub const MAX_VIEWPORT_WIDTH: f32 = 16_384.0;
    /// Hard limit on trees held by one stream
    pub const MAX_STREAM_TREES: usize = 4_096;
}

/// Distance score shown in the HUD (meters flown)
#[inline]
pub fn score_for_distance(x: f32) -> u32 {
    (x / consts::UNITS_PER_METER).floor().max(0.0) as u32
}

/// Sine of an angle given in degrees
#[inline]
pub fn sin_degrees(degrees: f32) -> f32 {
    degrees.to_radians().sin()
}
