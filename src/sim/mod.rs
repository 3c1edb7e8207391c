//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, driven by the host
//! - Seeded RNG only
//! - Trees kept in ascending x order
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod state;
pub mod stream;
pub mod terrain;
pub mod tick;

pub use collision::{Circle, cart_hit_points, detect, end_condition, tree_hit};
pub use physics::step_vehicle;
pub use state::{
    BackgroundTree, EndReason, GamePhase, SimulationState, Snapshot, Tree, TreeColor,
    VehicleState, Viewport,
};
pub use stream::{extend_background, extend_foreground, trim};
pub use terrain::{BACKGROUND_HILL, HILL_LAYERS, HillLayer};
pub use tick::{TickResult, tick};
