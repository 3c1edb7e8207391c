//! Game state and core simulation types
//!
//! The whole run lives in one `SimulationState`; nothing is global.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use super::stream;
use crate::consts::*;
use crate::error::SimError;
use crate::score_for_distance;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh layout, waiting for the first burn
    Ready,
    /// Active gameplay
    Flying,
    /// Run ended
    GameOver(EndReason),
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Cart touched a tree crown
    Crashed,
    /// Landed with an empty tank
    OutOfFuel,
}

/// The balloon. `pos.y` is 0 on the ground and negative above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub pos: Vec2,
    /// Negative is upward
    pub vertical_velocity: f32,
    pub horizontal_velocity: f32,
    /// Remaining fuel, 0-100
    pub fuel: f32,
    /// Burner on (button held)
    pub heating: bool,
}

impl VehicleState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            vertical_velocity: tuning.start_vertical_velocity,
            horizontal_velocity: tuning.horizontal_speed,
            fuel: tuning.initial_fuel,
            heating: false,
        }
    }

    /// Height above ground (never negative)
    #[inline]
    pub fn altitude(&self) -> f32 {
        (-self.pos.y).max(0.0)
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.pos.y < 0.0
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.pos.y >= 0.0
    }

    /// Gauge turns red
    pub fn fuel_low(&self) -> bool {
        self.fuel <= FUEL_WARNING_LEVEL
    }
}

/// Crown/foliage palette shared by both tree layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeColor {
    Olive,
    Moss,
    Lime,
}

impl TreeColor {
    pub const ALL: [TreeColor; 3] = [TreeColor::Olive, TreeColor::Moss, TreeColor::Lime];

    pub fn hex(&self) -> &'static str {
        match self {
            TreeColor::Olive => "#6D8821",
            TreeColor::Moss => "#8FAC34",
            TreeColor::Lime => "#98B333",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A collidable foreground tree, anchored at the base of its trunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub x: f32,
    /// Trunk height; crowns sit above it
    pub height: f32,
    /// Crown cluster radii in `CROWN_OFFSETS` order
    pub radii: [f32; 7],
    pub color: TreeColor,
}

impl Tree {
    /// All seven crown clusters in world space, in drawing order
    pub fn crown_circles(&self) -> [Circle; 7] {
        std::array::from_fn(|i| {
            let (dx, dy) = CROWN_OFFSETS[i];
            Circle {
                center: Vec2::new(self.x + dx, -self.height + dy),
                radius: self.radii[i],
            }
        })
    }
}

/// Decorative tree on the far hill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundTree {
    pub x: f32,
    pub color: TreeColor,
}

/// Screen size the game is laid out for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !(0.0..=MAX_VIEWPORT_WIDTH).contains(&width) {
            return Err(SimError::InvalidViewport { width });
        }
        Ok(Self {
            width,
            height: height.max(0.0),
        })
    }

    /// Left edge of the centered main area; the balloon is drawn this far in
    pub fn horizontal_padding(&self) -> f32 {
        (self.width - MAIN_AREA_WIDTH) / 2.0
    }

    pub fn vertical_padding(&self) -> f32 {
        (self.height - MAIN_AREA_HEIGHT) / 2.0
    }
}

/// Read-only view handed to renderers each frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub vehicle: VehicleState,
    pub trees: Vec<Tree>,
    pub background_trees: Vec<BackgroundTree>,
    pub score: u32,
    pub fuel_low: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) tuning: Tuning,
    pub(crate) viewport: Viewport,
    pub(crate) phase: GamePhase,
    /// Ticks since last reset
    pub(crate) time_ticks: u64,
    pub(crate) vehicle: VehicleState,
    /// Foreground trees, ascending x
    pub(crate) trees: VecDeque<Tree>,
    /// Background hill trees, ascending x
    pub(crate) background_trees: VecDeque<BackgroundTree>,
    pub(crate) rng: Pcg32,
}

impl SimulationState {
    /// Create a fresh run with default tuning
    pub fn new(viewport: Viewport, seed: u64) -> Result<Self, SimError> {
        Self::with_tuning(viewport, seed, Tuning::default())
    }

    /// Create a fresh run with a random seed
    pub fn from_entropy(viewport: Viewport) -> Result<Self, SimError> {
        Self::new(viewport, rand::random())
    }

    pub fn with_tuning(viewport: Viewport, seed: u64, tuning: Tuning) -> Result<Self, SimError> {
        tuning.validate()?;
        let mut state = Self {
            seed,
            vehicle: VehicleState::new(&tuning),
            tuning,
            viewport,
            phase: GamePhase::Ready,
            time_ticks: 0,
            trees: VecDeque::new(),
            background_trees: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        Ok(state)
    }

    /// Put the balloon back on the ground and grow a new forest.
    /// The RNG stream continues, so every restart gets a different layout.
    pub fn reset(&mut self) {
        self.vehicle = VehicleState::new(&self.tuning);
        self.phase = GamePhase::Ready;
        self.time_ticks = 0;
        stream::populate(
            &mut self.trees,
            &mut self.background_trees,
            &self.viewport,
            &self.tuning,
            &mut self.rng,
        );
        log::info!(
            "Reset (seed {}): {} trees, {} background trees",
            self.seed,
            self.trees.len(),
            self.background_trees.len()
        );
    }

    /// Burner input; the first burn starts the run
    pub fn set_heating(&mut self, heating: bool) {
        self.vehicle.heating = heating;
        if heating && self.phase == GamePhase::Ready {
            self.phase = GamePhase::Flying;
            log::info!("Lift off");
        }
    }

    /// Change screen size without regrowing the forest
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance one frame
    pub fn tick(&mut self) -> super::TickResult {
        super::tick(self)
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn trees(&self) -> &VecDeque<Tree> {
        &self.trees
    }

    pub fn background_trees(&self) -> &VecDeque<BackgroundTree> {
        &self.background_trees
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn score(&self) -> u32 {
        score_for_distance(self.vehicle.pos.x)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            vehicle: self.vehicle,
            trees: self.trees.iter().copied().collect(),
            background_trees: self.background_trees.iter().copied().collect(),
            score: self.score(),
            fuel_low: self.vehicle.fuel_low(),
        }
    }
}
