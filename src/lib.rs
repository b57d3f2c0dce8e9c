//! Dot Align - keep the dot on the bouncing bar
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, overlap, scoring, game phase)
//! - `platform`: Frame driver, timers, demo autopilot and web bindings
//! - `audio`: Sound cue selection for the audio layer
//! - `ui`: HUD model and per-frame view for the presentation layer
//! - `settings`: Data-driven tuning and preferences

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{Settings, SettingsError};

/// Default tuning values
pub mod consts {
    /// Track (the grey bar) width in pixels
    pub const TRACK_WIDTH: f32 = 800.0;

    /// Marker bar (the red bar) width in pixels
    pub const MARKER_WIDTH: f32 = 150.0;
    /// Marker bar speed in pixels per frame
    pub const MARKER_SPEED: f32 = 2.0;

    /// Dot radius in pixels
    pub const DOT_RADIUS: f32 = 10.0;
    /// Dot speed while the pointer is held (pixels per frame)
    pub const DOT_RIGHT_SPEED: f32 = 4.0;
    /// Dot speed while the pointer is released (pixels per frame)
    pub const DOT_LEFT_SPEED: f32 = 3.0;

    /// Overlap time needed for one point
    pub const SCORE_INTERVAL_MS: f64 = 1000.0;

    /// First achievement threshold
    pub const FIRST_THRESHOLD: u64 = 25;
    /// Messages cycled through as thresholds are reached
    pub const ACHIEVEMENT_MESSAGES: [&str; 4] = ["Awesome!", "Nice!", "Yo!", "Rad!"];
    /// How long an achievement banner stays up
    pub const BANNER_DURATION_MS: u32 = 3000;

    /// Countdown digits shown before a round (3, 2, 1)
    pub const COUNTDOWN_STEPS: u8 = 3;
    pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;

    /// Fallback screen size before the windowing layer reports one
    pub const DEFAULT_SCREEN_WIDTH: f32 = 1280.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 720.0;
}

/// Next rung of the achievement ladder after `reached`
#[inline]
pub fn next_threshold(reached: u64) -> u64 {
    reached.saturating_mul(2).saturating_add(10)
}
