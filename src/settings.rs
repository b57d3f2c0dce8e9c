//! Game tuning and preferences
//!
//! Loaded from JSON by the native runner or handed over by the web page.
//! Every field has a default, so partial files are fine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    pub track_width: f32,
    pub marker_width: f32,
    pub dot_radius: f32,

    // === Motion (pixels per frame) ===
    /// Signed initial marker speed; positive moves right
    pub marker_speed: f32,
    pub dot_right_speed: f32,
    pub dot_left_speed: f32,

    // === Scoring ===
    pub score_interval_ms: f64,
    pub first_threshold: u64,
    pub achievement_messages: Vec<String>,
    pub banner_duration_ms: u32,

    // === Countdown ===
    pub countdown_steps: u8,
    pub countdown_interval_ms: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track_width: TRACK_WIDTH,
            marker_width: MARKER_WIDTH,
            dot_radius: DOT_RADIUS,

            marker_speed: MARKER_SPEED,
            dot_right_speed: DOT_RIGHT_SPEED,
            dot_left_speed: DOT_LEFT_SPEED,

            score_interval_ms: SCORE_INTERVAL_MS,
            first_threshold: FIRST_THRESHOLD,
            achievement_messages: ACHIEVEMENT_MESSAGES.iter().map(|m| m.to_string()).collect(),
            banner_duration_ms: BANNER_DURATION_MS,

            countdown_steps: COUNTDOWN_STEPS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tunings that would break the simulation invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(name: &str, v: f32) -> Result<(), SettingsError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid(format!("{name} must be positive, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f32) -> Result<(), SettingsError> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid(format!("{name} must be >= 0, got {v}")))
            }
        }
        fn unit(name: &str, v: f32) -> Result<(), SettingsError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(SettingsError::Invalid(format!("{name} must be within 0..=1, got {v}")))
            }
        }

        positive("track_width", self.track_width)?;
        positive("marker_width", self.marker_width)?;
        positive("dot_radius", self.dot_radius)?;
        if self.marker_width > self.track_width {
            return Err(SettingsError::Invalid(format!(
                "marker_width ({}) exceeds track_width ({})",
                self.marker_width, self.track_width
            )));
        }

        if !self.marker_speed.is_finite() {
            return Err(SettingsError::Invalid("marker_speed must be finite".into()));
        }
        non_negative("dot_right_speed", self.dot_right_speed)?;
        non_negative("dot_left_speed", self.dot_left_speed)?;

        if !(self.score_interval_ms.is_finite() && self.score_interval_ms > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "score_interval_ms must be positive, got {}",
                self.score_interval_ms
            )));
        }
        if self.first_threshold == 0 {
            return Err(SettingsError::Invalid("first_threshold must be at least 1".into()));
        }
        if self.achievement_messages.is_empty() {
            return Err(SettingsError::Invalid("achievement_messages is empty".into()));
        }

        unit("master_volume", self.master_volume)?;
        unit("sfx_volume", self.sfx_volume)?;
        unit("music_volume", self.music_volume)?;

        Ok(())
    }
}
