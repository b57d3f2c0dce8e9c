//! Collision detection for horizontal spans
//!
//! Two checks drive the whole game: whether the dot still overlaps the
//! marker bar, and whether the marker bar has run past an end of the track.

use serde::{Deserialize, Serialize};

use super::span::Span;

/// Which end of the track was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackEnd {
    Left,
    Right,
}

/// Result of containing a body inside the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Containment {
    /// Center position after clamping
    pub center: f32,
    /// End that was struck, if the body had to be pushed back
    pub hit: Option<TrackEnd>,
}

/// Inclusive overlap test: spans that merely touch still overlap.
pub fn spans_overlap(a: &Span, b: &Span) -> bool {
    !(a.right() < b.left() || a.left() > b.right())
}

/// Keep `body` fully inside `track`, reporting which end it ran into.
///
/// A body exactly on the boundary is not a hit; only overshoot counts.
pub fn contain_in_track(body: &Span, track: &Span) -> Containment {
    let (min, max) = track.inner_range(body.half_width);

    if body.center < min {
        Containment {
            center: min,
            hit: Some(TrackEnd::Left),
        }
    } else if body.center > max {
        Containment {
            center: max,
            hit: Some(TrackEnd::Right),
        }
    } else {
        Containment {
            center: body.center,
            hit: None,
        }
    }
}

/// Clamp a position into `[min, max]` without panicking when the range is
/// inverted (tiny screens); `max` wins in that case.
#[inline]
pub fn clamp_position(x: f32, min: f32, max: f32) -> f32 {
    x.max(min).min(max)
}
