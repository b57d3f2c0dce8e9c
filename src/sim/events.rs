//! Game events
//!
//! Everything the simulation wants the outside world to react to. The core
//! never plays sounds, shows banners or arms timers itself: it emits an
//! event and the presentation/timer collaborators fulfill it.

use serde::{Deserialize, Serialize};

use super::collision::TrackEnd;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Round requested; the first countdown step is due in `next_in_ms`
    Started { next_in_ms: u32 },

    /// Show countdown digit `value`; the next step is due in `next_in_ms`
    CountdownStep { value: u8, next_in_ms: u32 },

    /// Countdown done; the next pointer-down launches the round
    CountdownFinished,

    /// Round is live
    Launched { pointer_held: bool },

    /// Pointer pressed during a live round
    Click,

    /// Marker bar bounced off a track end
    Hit { end: TrackEnd },

    /// One more point
    ScoreTick { score: u64 },

    /// Threshold reached; hide the banner after `expires_after_ms`
    Achievement {
        message: String,
        threshold: u64,
        expires_after_ms: u32,
    },

    /// Dot left the bar
    GameOver { final_score: u64 },
}

impl GameEvent {
    /// Short label for logs
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Started { .. } => "started",
            GameEvent::CountdownStep { .. } => "countdown_step",
            GameEvent::CountdownFinished => "countdown_finished",
            GameEvent::Launched { .. } => "launched",
            GameEvent::Click => "click",
            GameEvent::Hit { .. } => "hit",
            GameEvent::ScoreTick { .. } => "score_tick",
            GameEvent::Achievement { .. } => "achievement",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&GameEvent::GameOver { final_score: 7 }).unwrap();
        assert_eq!(json, r#"{"type":"game_over","final_score":7}"#);

        let json = serde_json::to_string(&GameEvent::Hit { end: TrackEnd::Left }).unwrap();
        assert_eq!(json, r#"{"type":"hit","end":"Left"}"#);
    }

    #[test]
    fn test_names() {
        assert_eq!(GameEvent::CountdownFinished.name(), "countdown_finished");
        assert_eq!(GameEvent::ScoreTick { score: 1 }.name(), "score_tick");
    }
}
