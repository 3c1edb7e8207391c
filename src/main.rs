//! Balloon Drift entry point
//!
//! The playable game runs in the browser through `platform::WebGame`. The
//! native binary flies a headless run on autopilot, which is handy for
//! checking a seed or a tuning file.
//!
//! Usage: `balloon-drift [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use balloon_drift::{
    SimError, Tuning,
    sim::{SimulationState, Viewport, tree_hit},
};

/// Give up on runs that somehow never end
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 200_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Balloon Drift (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);

    let run = args
        .next()
        .map(load_tuning)
        .transpose()
        .and_then(|tuning| fly(seed, tuning.unwrap_or_default()));

    match run {
        Ok(state) => println!(
            "seed {}: {} m in {} ticks ({:?})",
            seed,
            state.score(),
            state.time_ticks(),
            state.phase()
        ),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: String) -> Result<Tuning, SimError> {
    match std::fs::read_to_string(&path) {
        Ok(json) => Tuning::from_json(&json),
        Err(e) => {
            log::warn!("Could not read {}: {}, using default tuning", path, e);
            Ok(Tuning::default())
        }
    }
}

/// Fly one run with a simple look-ahead autopilot
#[cfg(not(target_arch = "wasm32"))]
fn fly(seed: u64, tuning: Tuning) -> Result<SimulationState, SimError> {
    let viewport = Viewport::new(1280.0, 720.0)?;
    let mut state = SimulationState::with_tuning(viewport, seed, tuning)?;

    while !state.is_game_over() && state.time_ticks() < MAX_TICKS {
        let heat = autopilot(&state);
        state.set_heating(heat);
        state.tick();
    }
    Ok(state)
}

/// Burn whenever the cart would clip a crown within the next stretch of
/// flight at the current height, or when sinking fast near the canopy
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &SimulationState) -> bool {
    let vehicle = state.vehicle();
    let lookahead = 40.0 * vehicle.horizontal_velocity;
    let mut ahead = vehicle.pos;
    ahead.y += vehicle.vertical_velocity.max(0.0) * 10.0;

    state
        .trees()
        .iter()
        .filter(|t| t.x > vehicle.pos.x - 80.0 && t.x < vehicle.pos.x + lookahead)
        .any(|t| {
            (0..=8).any(|step| {
                let mut p = ahead;
                p.x += step as f32 * lookahead / 8.0;
                tree_hit(t, p) || tree_hit(t, p + glam::Vec2::new(0.0, 40.0))
            })
        })
        || vehicle.altitude() < 20.0
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::start, this is just to satisfy the compiler
}
