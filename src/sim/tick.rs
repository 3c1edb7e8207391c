//! Per-frame simulation tick
//!
//! Core game loop: move the balloon, recycle trees, then check for the end.

use serde::{Deserialize, Serialize};

use super::collision::{detect, end_condition};
use super::physics::step_vehicle;
use super::state::{EndReason, GamePhase, SimulationState, VehicleState};
use super::stream;

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    pub vehicle: VehicleState,
    pub game_over: bool,
    pub end_reason: Option<EndReason>,
}

/// Advance the game state by one frame.
///
/// Ticking a finished run changes nothing and reports the same ending again.
pub fn tick(state: &mut SimulationState) -> TickResult {
    if let GamePhase::GameOver(reason) = state.phase {
        return TickResult {
            vehicle: state.vehicle,
            game_over: true,
            end_reason: Some(reason),
        };
    }

    state.time_ticks += 1;
    state.vehicle = step_vehicle(&state.vehicle, &state.tuning);

    maintain_streams(state);

    let hit = detect(&state.vehicle, &state.trees);
    let end_reason = end_condition(&state.vehicle, hit);
    if let Some(reason) = end_reason {
        state.phase = GamePhase::GameOver(reason);
        log::info!(
            "Game over ({:?}) after {} ticks: {} m",
            reason,
            state.time_ticks,
            state.score()
        );
    }

    TickResult {
        vehicle: state.vehicle,
        game_over: end_reason.is_some(),
        end_reason,
    }
}

/// Recycle trees that scrolled away, then make sure both streams reach past
/// the right edge of the screen
fn maintain_streams(state: &mut SimulationState) {
    let x = state.vehicle.pos.x;
    let viewport = state.viewport;

    stream::recycle_foreground(&mut state.trees, x, &viewport, &state.tuning, &mut state.rng);
    stream::recycle_background(
        &mut state.background_trees,
        x,
        &viewport,
        &state.tuning,
        &mut state.rng,
    );

    let added = stream::fill_foreground(
        &mut state.trees,
        stream::foreground_view_end(x, &viewport),
        &state.tuning,
        &mut state.rng,
    ) + stream::fill_background(
        &mut state.background_trees,
        stream::background_view_end(x, &viewport),
        &state.tuning,
        &mut state.rng,
    );
    if added > 0 {
        log::debug!("Extended lookahead by {} trees", added);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use glam::Vec2;

    use super::*;
    use crate::sim::{Tree, TreeColor, Viewport};

    fn new_state(seed: u64) -> SimulationState {
        SimulationState::new(Viewport::new(800.0, 600.0).unwrap(), seed).unwrap()
    }

    fn lone_tree(x: f32) -> VecDeque<Tree> {
        VecDeque::from([Tree {
            x,
            height: 100.0,
            radii: [40.0; 7],
            color: TreeColor::Moss,
        }])
    }

    #[test]
    fn test_idle_balloon_stays_grounded() {
        let mut state = new_state(1);
        for _ in 0..500 {
            let result = tick(&mut state);
            assert!(!result.game_over);
            assert_eq!(result.vehicle.pos, Vec2::ZERO);
            assert_eq!(result.vehicle.fuel, 100.0);
        }
        assert_eq!(state.time_ticks(), 500);
    }

    #[test]
    fn test_heating_takes_off_and_drifts() {
        let mut state = new_state(2);
        state.trees = lone_tree(1000.0);
        state.set_heating(true);

        let mut last_x = 0.0;
        let mut airborne_ticks = 0;
        for _ in 0..40 {
            let result = tick(&mut state);
            assert!(!result.game_over);
            if result.vehicle.pos.y < 0.0 {
                assert!(result.vehicle.pos.x > last_x);
                airborne_ticks += 1;
            }
            last_x = result.vehicle.pos.x;
        }
        assert!(airborne_ticks > 20);
        assert!(state.vehicle().pos.y < 0.0);
        assert!(state.vehicle().fuel < 100.0);
    }

    #[test]
    fn test_out_of_fuel_landing_ends_game() {
        let mut state = new_state(3);
        state.trees = lone_tree(1.0e6);
        state.vehicle.pos = Vec2::new(0.0, -200.0);
        state.vehicle.vertical_velocity = 0.0;
        state.vehicle.fuel = 1.0;
        state.set_heating(true);

        while state.vehicle().fuel > 0.0 {
            let result = tick(&mut state);
            assert!(!result.game_over);
        }
        assert_eq!(state.vehicle().fuel, 0.0);

        state.set_heating(false);
        let mut ticks = 0;
        loop {
            let before = *state.vehicle();
            assert!(before.pos.y < 0.0);
            let result = tick(&mut state);
            ticks += 1;
            assert!(ticks < 1000, "balloon never landed");
            if result.vehicle.pos.y >= 0.0 {
                assert!(result.game_over);
                assert_eq!(result.end_reason, Some(EndReason::OutOfFuel));
                break;
            }
            assert!(!result.game_over);
        }
        assert!(state.is_game_over());
    }

    #[test]
    fn test_crash_into_tree() {
        let mut state = new_state(4);
        // Bottom-right cart corner ends up just under the bottom-left cluster center
        state.trees = lone_tree(200.0);
        state.vehicle.pos = Vec2::new(145.0, -120.0);
        state.vehicle.vertical_velocity = 0.0;
        state.set_heating(true);

        let result = tick(&mut state);
        assert!(result.game_over);
        assert_eq!(result.end_reason, Some(EndReason::Crashed));
        assert_eq!(state.phase(), GamePhase::GameOver(EndReason::Crashed));
    }

    #[test]
    fn test_finished_run_is_frozen() {
        let mut state = new_state(5);
        state.trees = lone_tree(200.0);
        state.vehicle.pos = Vec2::new(145.0, -120.0);
        tick(&mut state);
        assert!(state.is_game_over());

        let frozen = *state.vehicle();
        let ticks = state.time_ticks();
        let again = tick(&mut state);
        assert!(again.game_over);
        assert_eq!(again.vehicle, frozen);
        assert_eq!(state.time_ticks(), ticks);
    }

    #[test]
    fn test_streams_follow_long_flight() {
        let mut state = new_state(6);
        let bg_len = state.background_trees().len();
        // Keep clear of every crown by flying far above the forest
        state.trees.clear();
        state.vehicle.pos = Vec2::new(0.0, -2000.0);
        state.vehicle.vertical_velocity = 0.0;
        state.vehicle.fuel = 0.0;

        for _ in 0..200 {
            tick(&mut state);
        }
        let x = state.vehicle().pos.x;
        assert!(x > 900.0);
        let view_end = stream::foreground_view_end(x, state.viewport());
        assert!(state.trees().back().unwrap().x > view_end);
        // Background recycles one for one and never needs topping up here
        assert_eq!(state.background_trees().len(), bg_len);
        let padding = state.viewport().horizontal_padding();
        let head = state.trees().front().unwrap();
        assert!(!stream::is_behind(head.x, x, padding, state.tuning().tree_trim_margin));
        for (a, b) in state.trees().iter().zip(state.trees().iter().skip(1)) {
            assert!((50.0..=600.0).contains(&(b.x - a.x)));
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);
        let inputs = [true, true, false, true, false, false, true];

        for _ in 0..30 {
            for &heat in &inputs {
                state1.set_heating(heat);
                state2.set_heating(heat);
                tick(&mut state1);
                tick(&mut state2);
            }
        }

        assert_eq!(state1.time_ticks(), state2.time_ticks());
        assert_eq!(state1.vehicle(), state2.vehicle());
        assert_eq!(state1.trees(), state2.trees());
        assert_eq!(state1.background_trees(), state2.background_trees());
    }
}
