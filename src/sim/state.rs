//! Game state and core simulation types
//!
//! All state the simulation owns lives here; nothing is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{TrackEnd, clamp_position, contain_in_track};
use super::events::GameEvent;
use super::span::Span;
use crate::Settings;
use crate::consts::ACHIEVEMENT_MESSAGES;
use crate::next_threshold;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    NotStarted,
    /// Counting down; `armed` once the last digit is gone and a
    /// pointer-down will launch the round
    Countdown { remaining: u8, armed: bool },
    /// Active gameplay
    Running,
    /// Dot fell off the bar
    Over,
}

/// The grey track the marker bar bounces in
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Track {
    pub span: Span,
    /// Vertical center, shared by every body
    pub y: f32,
}

impl Track {
    pub fn new(screen: Vec2, width: f32) -> Self {
        Self {
            span: Span::with_width(screen.x / 2.0, width),
            y: screen.y / 2.0,
        }
    }

    /// Range the marker bar's center may occupy
    pub fn marker_range(&self, marker: &MarkerBar) -> (f32, f32) {
        self.span.inner_range(marker.width / 2.0)
    }
}

/// The red bar the player has to follow
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkerBar {
    pub x: f32,
    pub width: f32,
    /// Signed speed in pixels per frame; positive moves right
    pub speed: f32,
}

impl MarkerBar {
    pub fn span(&self) -> Span {
        Span::with_width(self.x, self.width)
    }

    /// Move one frame, bouncing off the track ends.
    /// Returns the end struck, if any.
    pub fn advance(&mut self, track: &Track) -> Option<TrackEnd> {
        self.x += self.speed;

        let contained = contain_in_track(&self.span(), &track.span);
        self.x = contained.center;
        if contained.hit.is_some() {
            self.speed = -self.speed;
        }
        contained.hit
    }
}

/// The player's dot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dot {
    pub pos: Vec2,
    pub radius: f32,
    /// Speed while the pointer is held
    pub right_speed: f32,
    /// Speed while the pointer is released
    pub left_speed: f32,
}

impl Dot {
    pub fn span(&self) -> Span {
        Span::new(self.pos.x, self.radius)
    }

    /// Move one frame in the direction picked by the pointer, staying on screen
    pub fn advance(&mut self, pointer_held: bool, screen_width: f32) {
        if pointer_held {
            self.pos.x += self.right_speed;
        } else {
            self.pos.x -= self.left_speed;
        }
        self.pos.x = clamp_position(self.pos.x, self.radius, screen_width - self.radius);
    }
}

/// Points and the partial second counting toward the next one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    /// Overlap time accumulated since the last point
    pub in_bounds_ms: f64,
    /// Overlap time worth one point
    pub interval_ms: f64,
}

impl ScoreState {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            score: 0,
            in_bounds_ms: 0.0,
            interval_ms,
        }
    }

    /// Add overlap time; returns true when a point was scored.
    ///
    /// A single long frame never yields more than one point.
    pub fn accumulate(&mut self, delta_ms: f64) -> bool {
        self.in_bounds_ms += delta_ms;
        if self.in_bounds_ms >= self.interval_ms {
            self.score += 1;
            self.in_bounds_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.in_bounds_ms = 0.0;
    }
}

/// Growing list of score thresholds with their celebration messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementLadder {
    /// Append-only, strictly increasing
    pub thresholds: Vec<u64>,
    /// Index of the next threshold to reach
    pub index: usize,
    pub messages: Vec<String>,
    seed: u64,
}

impl AchievementLadder {
    pub fn new(first_threshold: u64, messages: &[String]) -> Self {
        let messages = if messages.is_empty() {
            ACHIEVEMENT_MESSAGES.iter().map(|m| m.to_string()).collect()
        } else {
            messages.to_vec()
        };
        Self {
            thresholds: vec![first_threshold],
            index: 0,
            messages,
            seed: first_threshold,
        }
    }

    /// Threshold the player is currently chasing
    pub fn current(&self) -> u64 {
        self.thresholds[self.index]
    }

    /// Check a new score against the ladder. On success returns the message
    /// and the threshold reached, and appends the next rung.
    pub fn check(&mut self, score: u64) -> Option<(String, u64)> {
        let reached = self.current();
        if score < reached {
            return None;
        }

        let message = self.messages[self.index % self.messages.len()].clone();
        self.index += 1;
        self.thresholds.push(next_threshold(reached));
        Some((message, reached))
    }

    pub fn reset(&mut self) {
        self.thresholds.clear();
        self.thresholds.push(self.seed);
        self.index = 0;
    }
}

/// Timing values copied out of the settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timing {
    pub countdown_steps: u8,
    pub countdown_interval_ms: u32,
    pub banner_duration_ms: u32,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Screen size reported by the windowing layer
    pub screen: Vec2,
    pub phase: GamePhase,
    pub track: Track,
    pub marker: MarkerBar,
    pub dot: Dot,
    pub score: ScoreState,
    pub ladder: AchievementLadder,
    pub timing: Timing,
    /// Dot direction: held moves right, released moves left
    pub pointer_held: bool,
    /// Running ticks since the round launched
    pub time_ticks: u64,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh scene for the given screen size
    pub fn new(settings: &Settings, screen: Vec2) -> Self {
        let track = Track::new(screen, settings.track_width);
        let center = Vec2::new(track.span.center, track.y);

        Self {
            screen,
            phase: GamePhase::NotStarted,
            track,
            marker: MarkerBar {
                x: center.x,
                width: settings.marker_width,
                speed: settings.marker_speed,
            },
            dot: Dot {
                pos: center,
                radius: settings.dot_radius,
                right_speed: settings.dot_right_speed,
                left_speed: settings.dot_left_speed,
            },
            score: ScoreState::new(settings.score_interval_ms),
            ladder: AchievementLadder::new(settings.first_threshold, &settings.achievement_messages),
            timing: Timing {
                countdown_steps: settings.countdown_steps,
                countdown_interval_ms: settings.countdown_interval_ms,
                banner_duration_ms: settings.banner_duration_ms,
            },
            pointer_held: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Horizontal center of the track
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.track.span.center, self.track.y)
    }

    /// Put the marker bar and dot back on the track center
    pub fn recenter_bodies(&mut self) {
        let center = self.center();
        self.marker.x = center.x;
        self.dot.pos = center;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
