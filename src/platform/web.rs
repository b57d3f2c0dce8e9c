//! Browser bindings
//!
//! The page owns the canvas, sounds and DOM; it forwards pointer, resize and
//! button events here and draws whatever `frame` returns.

use wasm_bindgen::prelude::*;

use super::autopilot::Autopilot;
use super::session::Session;
use crate::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger already initialized");
    }
    log::info!("Dot Align starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// Create the scene; `settings_json` may override any tuning value
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, settings_json: Option<String>) -> Result<WebGame, JsValue> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Settings::default(),
        };
        Ok(WebGame {
            session: Session::new(settings, width, height),
        })
    }

    /// Advance one animation frame; returns `{ view, events, sounds }` as JSON
    pub fn frame(&mut self, dt_ms: f64) -> Result<String, JsValue> {
        let output = self.session.frame(dt_ms);
        serde_json::to_string(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn press_start(&mut self) {
        self.session.press_start();
    }

    pub fn pointer_down(&mut self) {
        self.session.pointer_down();
    }

    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    pub fn retry(&mut self) {
        self.session.retry();
    }

    /// Toggle idle/demo mode
    pub fn set_demo(&mut self, enabled: bool, seed: u32) {
        let pilot = enabled.then(|| Autopilot::new(seed as u64));
        self.session.set_autopilot(pilot);
    }

    /// Volume updates for running loops arrive with the next frame
    pub fn set_muted(&mut self, muted: bool) {
        self.session.set_muted(muted);
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.session.set_master_volume(volume);
    }
}
