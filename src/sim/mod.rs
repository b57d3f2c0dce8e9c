//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per rendered frame, driven by the caller
//! - Time only enters through `delta_ms`
//! - Timers are requested through events, never run here
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod events;
pub mod span;
pub mod state;
pub mod tick;

pub use collision::{TrackEnd, spans_overlap};
pub use events::GameEvent;
pub use span::Span;
pub use state::{AchievementLadder, Dot, GamePhase, GameState, MarkerBar, ScoreState, Track};
pub use tick::{advance_countdown, pointer_down, pointer_up, resize, set_pointer_held, start, tick};
