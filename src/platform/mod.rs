//! Platform layer
//!
//! The collaborators the simulation relies on but does not own:
//! - `timers`: delayed requests (countdown steps, banner expiry)
//! - `session`: per-frame driver tying state, timers, HUD and audio together
//! - `autopilot`: idle/demo input
//! - `web`: browser bindings (wasm32 only)

pub mod autopilot;
pub mod session;
pub mod timers;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autopilot::Autopilot;
pub use session::{FrameOutput, Session};
pub use timers::{Fired, TimerKind, Timers};
