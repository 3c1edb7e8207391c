//! Balloon flight model
//!
//! One call advances the balloon by exactly one frame. Heating pushes the
//! vertical velocity upward twice as fast as cooling pulls it back down, and
//! the burner gets thirstier the higher the balloon flies.

use super::state::VehicleState;
use crate::tuning::Tuning;

/// Advance the balloon by one tick
pub fn step_vehicle(vehicle: &VehicleState, tuning: &Tuning) -> VehicleState {
    let mut next = *vehicle;

    if next.heating && next.fuel > 0.0 {
        next.vertical_velocity =
            (next.vertical_velocity - tuning.heat_acceleration).max(-tuning.max_ascent_speed);
        // Burn is based on altitude before this tick's move
        let burn = tuning.fuel_burn_per_altitude * next.altitude();
        next.fuel = (next.fuel - burn).max(0.0);
    } else {
        next.vertical_velocity =
            (next.vertical_velocity + tuning.cool_acceleration).min(tuning.max_descent_speed);
    }

    next.pos.y += next.vertical_velocity;
    if next.pos.y > 0.0 {
        next.pos.y = 0.0;
    }

    // Landing is a hard stop
    if next.pos.y < 0.0 {
        next.pos.x += next.horizontal_velocity;
    }

    next
}
