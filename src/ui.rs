//! HUD model and per-frame view
//!
//! The presentation layer draws whatever `FrameView` says; it never looks at
//! `GameState` directly.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GameEvent, GamePhase, GameState};

/// Everything on screen that is not a moving body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hud {
    /// Achievement banner currently shown
    pub banner: Option<String>,
    /// Bumped on every new banner so stale hide timers can be ignored
    #[serde(skip)]
    pub banner_generation: u32,
    /// Countdown digit currently shown
    pub countdown: Option<u8>,
    pub start_visible: bool,
    pub retry_visible: bool,
    pub game_over_visible: bool,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            start_visible: true,
            ..Default::default()
        }
    }

    /// Update from an emitted event
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started { .. } => {
                self.start_visible = false;
                self.retry_visible = false;
                self.game_over_visible = false;
                self.banner = None;
            }
            GameEvent::CountdownStep { value, .. } => self.countdown = Some(*value),
            GameEvent::CountdownFinished | GameEvent::Launched { .. } => self.countdown = None,
            GameEvent::Achievement { message, .. } => {
                self.banner = Some(message.clone());
                self.banner_generation = self.banner_generation.wrapping_add(1);
            }
            GameEvent::GameOver { .. } => {
                self.retry_visible = true;
                self.game_over_visible = true;
            }
            GameEvent::Click | GameEvent::Hit { .. } | GameEvent::ScoreTick { .. } => {}
        }
    }

    /// Hide the banner if `generation` is still the one showing
    pub fn expire_banner(&mut self, generation: u32) -> bool {
        if self.banner.is_some() && self.banner_generation == generation {
            self.banner = None;
            true
        } else {
            false
        }
    }
}

/// Score line text
pub fn score_text(state: &GameState) -> String {
    if state.phase == GamePhase::Over {
        format!("Final Score: {}", state.score.score)
    } else {
        format!("Score: {}", state.score.score)
    }
}

/// Horizontal body for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// Snapshot of one frame for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub screen: Vec2,
    pub track: BarView,
    pub marker: BarView,
    pub dot: Vec2,
    pub dot_radius: f32,
    pub score: u64,
    pub score_text: String,
    pub hud: Hud,
}

impl FrameView {
    pub fn capture(state: &GameState, hud: &Hud) -> Self {
        let y = state.track.y;
        Self {
            phase: state.phase,
            screen: state.screen,
            track: BarView {
                x: state.track.span.center,
                y,
                width: state.track.span.width(),
            },
            marker: BarView {
                x: state.marker.x,
                y,
                width: state.marker.width,
            },
            dot: state.dot.pos,
            dot_radius: state.dot.radius,
            score: state.score.score,
            score_text: score_text(state),
            hud: hud.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_hud_round_flow() {
        let mut hud = Hud::new();
        assert!(hud.start_visible);

        hud.apply(&GameEvent::Started { next_in_ms: 1000 });
        assert!(!hud.start_visible);

        hud.apply(&GameEvent::CountdownStep { value: 2, next_in_ms: 1000 });
        assert_eq!(hud.countdown, Some(2));
        hud.apply(&GameEvent::CountdownFinished);
        assert_eq!(hud.countdown, None);

        hud.apply(&GameEvent::GameOver { final_score: 4 });
        assert!(hud.retry_visible);
        assert!(hud.game_over_visible);
    }

    #[test]
    fn test_stale_banner_timer_ignored() {
        let mut hud = Hud::new();
        let achievement = |m: &str| GameEvent::Achievement {
            message: m.into(),
            threshold: 25,
            expires_after_ms: 3000,
        };

        hud.apply(&achievement("Awesome!"));
        let first = hud.banner_generation;
        hud.apply(&achievement("Nice!"));

        assert!(!hud.expire_banner(first));
        assert_eq!(hud.banner.as_deref(), Some("Nice!"));
        assert!(hud.expire_banner(hud.banner_generation));
        assert_eq!(hud.banner, None);
    }

    #[test]
    fn test_score_text() {
        let mut state = GameState::new(&Settings::default(), Vec2::new(800.0, 600.0));
        state.score.score = 12;
        assert_eq!(score_text(&state), "Score: 12");
        state.phase = GamePhase::Over;
        assert_eq!(score_text(&state), "Final Score: 12");
    }

    #[test]
    fn test_frame_view_json() {
        let state = GameState::new(&Settings::default(), Vec2::new(800.0, 600.0));
        let view = FrameView::capture(&state, &Hud::new());
        assert_eq!(view.track.width, 800.0);
        assert_eq!(view.marker.x, 400.0);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["score_text"], "Score: 0");
        assert_eq!(json["phase"], "NotStarted");
        assert_eq!(json["hud"]["start_visible"], true);
    }
}
