//! 1-D horizontal spans
//!
//! Every body in the game is reduced to an interval on the x axis:
//! - center: x coordinate of the middle
//! - half_width: extent on either side (left = center - half_width, right = center + half_width)

use serde::{Deserialize, Serialize};

/// A closed interval on the x axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub center: f32,
    pub half_width: f32,
}

impl Span {
    pub fn new(center: f32, half_width: f32) -> Self {
        Self { center, half_width }
    }

    /// Build a span from its full width
    pub fn with_width(center: f32, width: f32) -> Self {
        Self::new(center, width / 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center - self.half_width
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center + self.half_width
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    /// Check if an x coordinate lies inside the span (edges included)
    pub fn contains(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }

    /// Range a body of `inner_half_width` may occupy with its center while
    /// staying fully inside this span. Collapses to the center when the body
    /// is wider than the span.
    pub fn inner_range(&self, inner_half_width: f32) -> (f32, f32) {
        let slack = (self.half_width - inner_half_width).max(0.0);
        (self.center - slack, self.center + slack)
    }
}
