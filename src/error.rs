//! Errors raised when constructing or reconfiguring a simulation
//!
//! Ticking never fails; only bad viewport sizes or tuning values are rejected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Viewport width was negative or not a finite number
    #[error("invalid viewport width: {width}")]
    InvalidViewport { width: f32 },
    /// A tuning value would break the obstacle stream invariants
    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),
    #[error("failed to parse tuning: {0}")]
    Config(#[from] serde_json::Error),
}
