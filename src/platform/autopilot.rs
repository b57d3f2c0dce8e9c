//! Idle/demo mode input
//!
//! Plays the game by holding the pointer whenever the dot is left of the
//! marker bar's center. A seeded RNG makes it hesitate now and then so demo
//! rounds eventually end.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{self, GamePhase, GameState};

/// Chance per tick of freezing the current direction
pub const DEFAULT_ERROR_RATE: f32 = 0.004;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    error_rate: f32,
    /// Ticks left in the current hesitation
    hesitation: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self::with_error_rate(seed, DEFAULT_ERROR_RATE)
    }

    pub fn with_error_rate(seed: u64, error_rate: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            error_rate: error_rate.clamp(0.0, 1.0),
            hesitation: 0,
        }
    }

    /// Feed input for the coming tick
    pub fn drive(&mut self, state: &mut GameState) {
        match state.phase {
            GamePhase::Countdown { armed: true, .. } => sim::pointer_down(state),
            GamePhase::Running => self.steer(state),
            _ => {}
        }
    }

    fn steer(&mut self, state: &mut GameState) {
        if self.hesitation > 0 {
            self.hesitation -= 1;
            return;
        }

        if self.error_rate > 0.0 && self.rng.random::<f32>() < self.error_rate {
            self.hesitation = self.rng.random_range(10..40);
            log::debug!("Autopilot hesitating for {} ticks", self.hesitation);
            return;
        }

        let want_right = state.dot.pos.x < state.marker.x;
        if want_right != state.pointer_held {
            if want_right {
                sim::pointer_down(state);
            } else {
                sim::pointer_up(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use glam::Vec2;

    fn armed_state() -> GameState {
        let mut state = GameState::new(&Settings::default(), Vec2::new(1280.0, 720.0));
        sim::start(&mut state);
        for _ in 0..4 {
            sim::advance_countdown(&mut state);
        }
        state
    }

    #[test]
    fn test_launches_when_armed() {
        let mut state = armed_state();
        Autopilot::new(1).drive(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_perfect_pilot_never_loses() {
        let mut state = armed_state();
        let mut pilot = Autopilot::with_error_rate(7, 0.0);
        for _ in 0..5000 {
            pilot.drive(&mut state);
            sim::tick(&mut state, 16.0);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.score.score >= 79);
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed| {
            let mut state = armed_state();
            let mut pilot = Autopilot::with_error_rate(seed, 0.05);
            for _ in 0..3000 {
                pilot.drive(&mut state);
                sim::tick(&mut state, 16.0);
            }
            (state.phase, state.time_ticks, state.score.score)
        };
        assert_eq!(play(42), play(42));
    }
}
