//! Per-frame simulation step and the input operations around it
//!
//! Everything here mutates a `GameState` in place and reports what happened
//! through `GameState::events`. Calls made in the wrong phase are no-ops.

use glam::Vec2;

use super::collision::spans_overlap;
use super::events::GameEvent;
use super::state::{GamePhase, GameState};

/// Advance the game state by one frame of `delta_ms` milliseconds
pub fn tick(state: &mut GameState, delta_ms: f64) {
    if state.phase != GamePhase::Running {
        return;
    }

    let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
    state.time_ticks += 1;

    // Marker bar bounces inside the track
    if let Some(end) = state.marker.advance(&state.track) {
        log::debug!("Marker hit {:?} end at x={}", end, state.marker.x);
        state.emit(GameEvent::Hit { end });
    }

    // Dot follows the pointer
    state.dot.advance(state.pointer_held, state.screen.x);

    if !spans_overlap(&state.dot.span(), &state.marker.span()) {
        state.phase = GamePhase::Over;
        let final_score = state.score.score;
        log::info!("Game over after {} ticks, final score {}", state.time_ticks, final_score);
        state.emit(GameEvent::GameOver { final_score });
        return;
    }

    if !state.score.accumulate(delta_ms) {
        return;
    }

    let score = state.score.score;
    log::debug!("Score {}", score);
    state.emit(GameEvent::ScoreTick { score });

    if let Some((message, threshold)) = state.ladder.check(score) {
        log::info!(
            "Achievement '{}' at {} (next: {})",
            message,
            threshold,
            state.ladder.current()
        );
        let expires_after_ms = state.timing.banner_duration_ms;
        state.emit(GameEvent::Achievement {
            message,
            threshold,
            expires_after_ms,
        });
    }
}

/// Begin a round: reset score and bodies, then start the countdown.
///
/// Only valid before the first round or after a game over.
pub fn start(state: &mut GameState) {
    match state.phase {
        GamePhase::NotStarted | GamePhase::Over => {}
        _ => return,
    }

    state.score.reset();
    state.ladder.reset();
    state.recenter_bodies();
    state.pointer_held = false;
    state.time_ticks = 0;
    state.phase = GamePhase::Countdown {
        remaining: state.timing.countdown_steps,
        armed: false,
    };

    log::info!("Round starting ({} step countdown)", state.timing.countdown_steps);
    state.emit(GameEvent::Started {
        next_in_ms: state.timing.countdown_interval_ms,
    });
}

/// Timer continuation for the countdown: shows the next digit, or arms the
/// launch once every digit has been shown.
pub fn advance_countdown(state: &mut GameState) {
    let GamePhase::Countdown { remaining, armed } = state.phase else {
        return;
    };
    if armed {
        return;
    }

    if remaining > 0 {
        state.phase = GamePhase::Countdown {
            remaining: remaining - 1,
            armed: false,
        };
        state.emit(GameEvent::CountdownStep {
            value: remaining,
            next_in_ms: state.timing.countdown_interval_ms,
        });
    } else {
        state.phase = GamePhase::Countdown {
            remaining: 0,
            armed: true,
        };
        log::info!("Countdown finished, waiting for pointer");
        state.emit(GameEvent::CountdownFinished);
    }
}

/// Pointer pressed anywhere on the scene
pub fn pointer_down(state: &mut GameState) {
    match state.phase {
        GamePhase::Countdown { armed: true, .. } => launch(state),
        GamePhase::Running => {
            state.pointer_held = true;
            state.emit(GameEvent::Click);
        }
        _ => {}
    }
}

/// Pointer released anywhere on the scene
pub fn pointer_up(state: &mut GameState) {
    set_pointer_held(state, false);
}

/// Set the dot direction directly; ignored unless the round is live
pub fn set_pointer_held(state: &mut GameState, held: bool) {
    if state.phase == GamePhase::Running {
        state.pointer_held = held;
    }
}

/// Screen size changed: recenter the track, bar and dot
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    // The dot must always fit between its clamps
    let min_width = state.dot.radius * 2.0;
    state.screen = Vec2::new(width.max(min_width), height.max(0.0));
    state.track.span.center = state.screen.x / 2.0;
    state.track.y = state.screen.y / 2.0;
    state.recenter_bodies();
    log::debug!("Resized to {}x{}", state.screen.x, state.screen.y);
}

/// Countdown is over and a pointer-down arrived
fn launch(state: &mut GameState) {
    // The dot starts out heading the same way as the bar
    state.pointer_held = state.marker.speed > 0.0;
    state.phase = GamePhase::Running;
    log::info!("Round launched (pointer_held={})", state.pointer_held);
    state.emit(GameEvent::Launched {
        pointer_held: state.pointer_held,
    });
}
