//! Data-driven game balance
//!
//! Every number that shapes how the balloon handles or how the forest is
//! generated lives here. Defaults reproduce the classic game.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Balloon ===
    /// Vertical velocity change per tick while burning (upward)
    pub heat_acceleration: f32,
    /// Vertical velocity change per tick while cooling (downward)
    pub cool_acceleration: f32,
    /// Fastest climb rate (magnitude of the most negative velocity)
    pub max_ascent_speed: f32,
    /// Fastest sink rate
    pub max_descent_speed: f32,
    /// Fuel burned per tick per unit of altitude
    pub fuel_burn_per_altitude: f32,
    /// Horizontal drift per tick while airborne
    pub horizontal_speed: f32,
    /// Vertical velocity after reset
    pub start_vertical_velocity: f32,
    /// Fuel after reset
    pub initial_fuel: f32,

    // === Foreground trees ===
    pub tree_min_gap: f32,
    pub tree_max_gap: f32,
    /// X of the first tree when the stream is empty
    pub first_tree_x: f32,
    pub tree_min_height: f32,
    pub tree_max_height: f32,
    pub crown_min_radius: f32,
    pub crown_max_radius: f32,
    /// How far behind the left screen edge a tree may go before it is recycled
    pub tree_trim_margin: f32,
    /// Viewport width per initial tree
    pub tree_spacing: f32,

    // === Background trees ===
    pub background_min_gap: f32,
    pub background_max_gap: f32,
    pub background_trim_margin: f32,
    pub background_spacing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            heat_acceleration: 0.4,
            cool_acceleration: 0.2,
            max_ascent_speed: 8.0,
            max_descent_speed: 5.0,
            fuel_burn_per_altitude: 0.002,
            horizontal_speed: 5.0,
            start_vertical_velocity: 5.0,
            initial_fuel: 100.0,

            tree_min_gap: 50.0,
            tree_max_gap: 600.0,
            first_tree_x: 400.0,
            tree_min_height: 60.0,
            tree_max_height: 140.0,
            crown_min_radius: 32.0,
            crown_max_radius: 48.0,
            tree_trim_margin: 100.0,
            tree_spacing: 50.0,

            background_min_gap: 30.0,
            background_max_gap: 150.0,
            background_trim_margin: 40.0,
            background_spacing: 30.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make streams or physics degenerate
    pub fn validate(&self) -> Result<(), SimError> {
        let all = [
            self.heat_acceleration,
            self.cool_acceleration,
            self.max_ascent_speed,
            self.max_descent_speed,
            self.fuel_burn_per_altitude,
            self.horizontal_speed,
            self.start_vertical_velocity,
            self.initial_fuel,
            self.tree_min_gap,
            self.tree_max_gap,
            self.first_tree_x,
            self.tree_min_height,
            self.tree_max_height,
            self.crown_min_radius,
            self.crown_max_radius,
            self.tree_trim_margin,
            self.tree_spacing,
            self.background_min_gap,
            self.background_max_gap,
            self.background_trim_margin,
            self.background_spacing,
        ];
        if !all.iter().all(|v| v.is_finite()) {
            return Err(SimError::InvalidTuning("every value must be finite"));
        }

        // Gaps are whole units, so the tail always moves forward
        let gaps = [
            (self.tree_min_gap, self.tree_max_gap, "tree gap range is empty or below one unit"),
            (
                self.background_min_gap,
                self.background_max_gap,
                "background gap range is empty or below one unit",
            ),
        ];
        for (min, max, msg) in gaps {
            if !(min >= 1.0 && min <= max) {
                return Err(SimError::InvalidTuning(msg));
            }
        }

        let ranges = [
            (self.tree_min_height, self.tree_max_height, "tree height range is empty or non-positive"),
            (self.crown_min_radius, self.crown_max_radius, "crown radius range is empty or non-positive"),
        ];
        for (min, max, msg) in ranges {
            if !(min > 0.0 && min <= max) {
                return Err(SimError::InvalidTuning(msg));
            }
        }
        if !(self.tree_spacing > 0.0 && self.background_spacing > 0.0) {
            return Err(SimError::InvalidTuning("initial spacing must be positive"));
        }
        let non_negative = [
            self.heat_acceleration,
            self.cool_acceleration,
            self.max_ascent_speed,
            self.max_descent_speed,
            self.initial_fuel,
            self.fuel_burn_per_altitude,
            self.tree_trim_margin,
            self.background_trim_margin,
        ];
        if non_negative.iter().any(|&v| v < 0.0) {
            return Err(SimError::InvalidTuning("rates, limits, fuel and margins must be non-negative"));
        }
        // At most one new tree per stream is needed per tick
        if !(self.horizontal_speed > 0.0 && self.horizontal_speed <= self.tree_min_gap) {
            return Err(SimError::InvalidTuning(
                "horizontal speed must be positive and no more than the minimum tree gap",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "horizontal_speed": 7.5 }"#).unwrap();
        assert_eq!(tuning.horizontal_speed, 7.5);
        assert_eq!(tuning.tree_min_gap, 50.0);
        assert_eq!(tuning.initial_fuel, 100.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning {
            tree_max_gap: 420.0,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_inverted_gap_range() {
        let err = Tuning::from_json(r#"{ "tree_min_gap": 700.0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let tuning = Tuning {
            horizontal_speed: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(SimError::InvalidTuning(_))));

        let tuning = Tuning {
            tree_trim_margin: f32::NAN,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            first_tree_x: f32::NEG_INFINITY,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_runaway_speed_and_negative_rates() {
        let tuning = Tuning {
            horizontal_speed: 51.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            cool_acceleration: -0.2,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_sub_unit_gaps() {
        let tuning = Tuning {
            background_min_gap: 1e-30,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
        let tuning = Tuning {
            tree_min_gap: 1.0,
            horizontal_speed: 1.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_unknown_parallax_field_is_ignored() {
        let tuning = Tuning::from_json(r#"{ "background_parallax": 1.0 }"#).unwrap();
        assert_eq!(tuning, Tuning::default());
        assert!(!tuning.to_json().unwrap().contains("parallax"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
