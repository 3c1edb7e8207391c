//! Platform abstraction layer
//!
//! The browser page owns the canvas, the mouse and the restart button. It
//! drives the game through `WebGame`: forward button state to
//! `set_heating`, call `tick` once per animation frame until it returns true,
//! and read `snapshot_json` to draw.

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    use crate::sim::{GamePhase, SimulationState, Viewport};

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::warn!("Logger already initialized");
        }
        log::info!("Balloon Drift (web) starting...");
    }

    /// Game instance owned by the page
    #[wasm_bindgen]
    pub struct WebGame {
        state: SimulationState,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new(width: f32, height: f32) -> Result<WebGame, JsError> {
            let viewport = Viewport::new(width, height)?;
            Ok(Self {
                state: SimulationState::from_entropy(viewport)?,
            })
        }

        /// Restart button / space bar
        pub fn reset(&mut self) {
            self.state.reset();
        }

        /// Window resize; the forest is kept
        pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsError> {
            self.state.resize(Viewport::new(width, height)?);
            Ok(())
        }

        /// Mouse down/up
        pub fn set_heating(&mut self, heating: bool) {
            self.state.set_heating(heating);
        }

        /// Advance one animation frame; true once the run has ended
        pub fn tick(&mut self) -> bool {
            self.state.tick().game_over
        }

        /// Hide the introduction once the balloon has been fired up
        pub fn started(&self) -> bool {
            self.state.phase() != GamePhase::Ready
        }

        pub fn score(&self) -> u32 {
            self.state.score()
        }

        pub fn fuel(&self) -> f32 {
            self.state.vehicle().fuel
        }

        /// Everything a renderer needs for one frame, as JSON
        pub fn snapshot_json(&self) -> Result<String, JsError> {
            Ok(self.state.snapshot().to_json()?)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebGame;
