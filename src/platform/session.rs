//! Frame driver
//!
//! Owns the simulation state together with the collaborators around it
//! (timers, HUD, audio cues, optional autopilot) and turns raw frame time
//! and pointer input into a `FrameOutput` for the presentation layer.

use glam::Vec2;
use serde::Serialize;

use super::autopilot::Autopilot;
use super::timers::{TimerKind, Timers};
use crate::Settings;
use crate::audio::{AudioCommand, AudioManager, SoundEffect};
use crate::sim::{self, GameEvent, GameState};
use crate::ui::{FrameView, Hud};

/// What the presentation layer gets back each frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    pub view: FrameView,
    pub events: Vec<GameEvent>,
    pub sounds: Vec<AudioCommand>,
}

/// Game instance holding all state
pub struct Session {
    settings: Settings,
    state: GameState,
    timers: Timers,
    hud: Hud,
    audio: AudioManager,
    autopilot: Option<Autopilot>,
    // Buffered until the next frame() call
    events: Vec<GameEvent>,
    sounds: Vec<AudioCommand>,
}

impl Session {
    pub fn new(settings: Settings, width: f32, height: f32) -> Self {
        let state = GameState::new(&settings, Vec2::new(width, height));
        let mut audio = AudioManager::from_settings(&settings);
        let sounds = audio.start_loop(SoundEffect::Ambience).into_iter().collect();
        log::info!("Scene created at {}x{}", width, height);

        Self {
            settings,
            state,
            timers: Timers::new(),
            hud: Hud::new(),
            audio,
            autopilot: None,
            events: Vec::new(),
            sounds,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    /// Mute/unmute; running loops get a volume update on the next frame
    pub fn set_muted(&mut self, muted: bool) {
        let commands = self.audio.set_muted(muted);
        self.sounds.extend(commands);
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        let commands = self.audio.set_master_volume(volume);
        self.sounds.extend(commands);
    }

    /// Enable or disable idle/demo mode
    pub fn set_autopilot(&mut self, autopilot: Option<Autopilot>) {
        log::info!("Idle mode: {}", autopilot.is_some());
        self.autopilot = autopilot;
    }

    /// Start button pressed
    pub fn press_start(&mut self) {
        sim::start(&mut self.state);
        self.route_events(self.timers.now_ms());
    }

    pub fn pointer_down(&mut self) {
        sim::pointer_down(&mut self.state);
        self.route_events(self.timers.now_ms());
    }

    pub fn pointer_up(&mut self) {
        sim::pointer_up(&mut self.state);
        self.route_events(self.timers.now_ms());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        sim::resize(&mut self.state, width, height);
    }

    /// Retry button: throw everything away and rebuild the scene
    pub fn retry(&mut self) {
        let screen = self.state.screen;
        self.state = GameState::new(&self.settings, screen);
        self.timers.clear();
        self.hud = Hud::new();
        self.events.clear();

        // A reload silences everything, then the scene's ambience comes back
        self.sounds.clear();
        let stops = self.audio.stop_loops();
        self.sounds.extend(stops);
        let ambience = self.audio.start_loop(SoundEffect::Ambience);
        self.sounds.extend(ambience);
        log::info!("Scene reloaded");
    }

    /// Run one rendered frame of `dt_ms` milliseconds
    pub fn frame(&mut self, dt_ms: f64) -> FrameOutput {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

        self.timers.advance_clock(dt_ms);
        while let Some(fired) = self.timers.pop_due() {
            match fired.kind {
                TimerKind::Countdown => {
                    sim::advance_countdown(&mut self.state);
                    self.route_events(fired.due_ms);
                }
                TimerKind::HideBanner { generation } => {
                    self.hud.expire_banner(generation);
                }
            }
        }

        if let Some(pilot) = self.autopilot.as_mut() {
            pilot.drive(&mut self.state);
        }

        sim::tick(&mut self.state, dt_ms);
        self.route_events(self.timers.now_ms());

        FrameOutput {
            view: self.view(),
            events: std::mem::take(&mut self.events),
            sounds: std::mem::take(&mut self.sounds),
        }
    }

    pub fn view(&self) -> FrameView {
        FrameView::capture(&self.state, &self.hud)
    }

    /// Hand freshly emitted events to the HUD, timers and audio.
    /// `base_ms` is the clock time the events happened at.
    fn route_events(&mut self, base_ms: f64) {
        let events = self.state.drain_events();
        if events.is_empty() {
            return;
        }

        for event in &events {
            self.hud.apply(event);
            match event {
                GameEvent::Started { next_in_ms } | GameEvent::CountdownStep { next_in_ms, .. } => {
                    self.timers
                        .schedule_at(base_ms + *next_in_ms as f64, TimerKind::Countdown);
                }
                GameEvent::Achievement {
                    expires_after_ms, ..
                } => {
                    let generation = self.hud.banner_generation;
                    self.timers.schedule_at(
                        base_ms + *expires_after_ms as f64,
                        TimerKind::HideBanner { generation },
                    );
                }
                _ => {}
            }
        }

        let commands = self.audio.commands_for(&events);
        self.sounds.extend(commands);
        self.events.extend(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{LogBackend, SoundCue};
    use crate::sim::GamePhase;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn session() -> Session {
        Session::new(Settings::default(), 800.0, 600.0)
    }

    /// Step frames until the countdown arms
    fn run_countdown(session: &mut Session) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..600 {
            events.extend(session.frame(FRAME_MS).events);
            if matches!(session.state().phase, GamePhase::Countdown { armed: true, .. }) {
                break;
            }
        }
        events
    }

    #[test]
    fn test_ambience_on_first_frame() {
        let mut session = session();
        let out = session.frame(FRAME_MS);
        assert_eq!(out.sounds.len(), 1);
        assert!(matches!(
            &out.sounds[0],
            AudioCommand::Play(cue) if cue.effect == SoundEffect::Ambience
        ));
        assert!(session.frame(FRAME_MS).sounds.is_empty());
    }

    #[test]
    fn test_countdown_runs_on_timers() {
        let mut session = session();
        session.press_start();
        assert!(!session.hud().start_visible);

        let events = run_countdown(&mut session);
        let digits: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::CountdownStep { value, .. } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(digits, vec![3, 2, 1]);
        assert!(events.contains(&GameEvent::CountdownFinished));
        // About four seconds of frames
        assert!((session.timers().now_ms() - 4000.0).abs() < FRAME_MS + 1.0);

        session.pointer_down();
        let out = session.frame(FRAME_MS);
        assert_eq!(out.events[0], GameEvent::Launched { pointer_held: true });
        assert_eq!(session.state().phase, GamePhase::Running);
    }

    #[test]
    fn test_long_frame_does_not_stretch_countdown() {
        let mut session = session();
        session.press_start();
        // One huge frame covers the whole countdown
        let out = session.frame(5000.0);
        assert!(out.events.contains(&GameEvent::CountdownFinished));
        assert!(matches!(
            session.state().phase,
            GamePhase::Countdown { armed: true, .. }
        ));
    }

    #[test]
    fn test_banner_expires_after_duration() {
        let settings = Settings {
            first_threshold: 1,
            ..Default::default()
        };
        let mut session = Session::new(settings, 800.0, 600.0);
        session.press_start();
        run_countdown(&mut session);
        session.pointer_down();

        // Keep the dot parked on the bar
        session.state.marker.speed = 0.0;
        session.state.dot.right_speed = 0.0;
        session.state.dot.left_speed = 0.0;

        let out = session.frame(1000.0);
        assert!(
            out.events
                .iter()
                .any(|e| matches!(e, GameEvent::Achievement { threshold: 1, .. }))
        );
        assert_eq!(session.hud().banner.as_deref(), Some("Awesome!"));

        session.frame(1495.0);
        session.frame(1495.0);
        assert!(session.hud().banner.is_some());
        session.frame(20.0);
        assert_eq!(session.hud().banner, None);
    }

    #[test]
    fn test_game_over_and_retry() {
        let mut session = session();
        session.press_start();
        run_countdown(&mut session);
        session.pointer_down();

        let mut sounds = Vec::new();
        for _ in 0..200 {
            let out = session.frame(FRAME_MS);
            sounds.extend(out.sounds.into_iter().filter_map(|c| match c {
                AudioCommand::Play(cue) => Some(cue.effect),
                _ => None,
            }));
            if session.state().phase == GamePhase::Over {
                break;
            }
        }
        assert_eq!(session.state().phase, GamePhase::Over);
        assert_eq!(sounds.last(), Some(&SoundEffect::GameOver));
        assert!(session.hud().retry_visible);
        assert!(session.view().score_text.starts_with("Final Score"));

        session.retry();
        assert_eq!(session.state().phase, GamePhase::NotStarted);
        assert!(session.hud().start_visible);
        assert!(session.timers().is_empty());
    }

    /// Play frames into `backend` until the round ends
    fn play_until_over(session: &mut Session, backend: &mut LogBackend) {
        session.press_start();
        for command in session.frame(0.0).sounds {
            command.dispatch(backend);
        }
        run_countdown(session);
        session.pointer_down();
        for _ in 0..200 {
            for command in session.frame(FRAME_MS).sounds {
                command.dispatch(backend);
            }
            if session.state().phase == GamePhase::Over {
                break;
            }
        }
        assert_eq!(session.state().phase, GamePhase::Over);
    }

    fn running(backend: &LogBackend, effect: SoundEffect) -> usize {
        backend.loops.iter().filter(|(e, _)| *e == effect).count()
    }

    #[test]
    fn test_restart_keeps_single_music_loop() {
        let mut session = session();
        let mut backend = LogBackend::default();
        play_until_over(&mut session, &mut backend);
        assert_eq!(running(&backend, SoundEffect::Music), 1);

        // Start again straight from the game-over screen
        play_until_over(&mut session, &mut backend);
        assert_eq!(running(&backend, SoundEffect::Music), 1);
        assert_eq!(running(&backend, SoundEffect::Ambience), 1);
    }

    #[test]
    fn test_retry_keeps_single_music_loop() {
        let mut session = session();
        let mut backend = LogBackend::default();
        play_until_over(&mut session, &mut backend);

        session.retry();
        for command in session.frame(FRAME_MS).sounds {
            command.dispatch(&mut backend);
        }
        assert_eq!(running(&backend, SoundEffect::Music), 0);
        assert_eq!(running(&backend, SoundEffect::Ambience), 1);

        play_until_over(&mut session, &mut backend);
        assert_eq!(running(&backend, SoundEffect::Music), 1);
        assert_eq!(running(&backend, SoundEffect::Ambience), 1);
    }

    #[test]
    fn test_retry_drops_pending_sounds() {
        let mut session = session();
        session.press_start();
        session.retry();

        // Only the stops and the fresh ambience survive; no stale click/start
        let sounds = session.frame(0.0).sounds;
        assert!(matches!(
            sounds.last(),
            Some(AudioCommand::Play(SoundCue {
                effect: SoundEffect::Ambience,
                looped: true,
                ..
            }))
        ));
        assert!(sounds[..sounds.len() - 1]
            .iter()
            .all(|c| matches!(c, AudioCommand::Stop { .. })));
        assert_eq!(session.audio().loops(), &[SoundEffect::Ambience]);
    }

    #[test]
    fn test_unmute_after_muted_start() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut session = Session::new(settings, 800.0, 600.0);
        let mut backend = LogBackend::default();
        session.press_start();
        for _ in 0..10 {
            for command in session.frame(FRAME_MS).sounds {
                command.dispatch(&mut backend);
            }
        }
        assert_eq!(
            backend.loops,
            vec![(SoundEffect::Ambience, 0.0), (SoundEffect::Music, 0.0)]
        );

        session.set_muted(false);
        for command in session.frame(FRAME_MS).sounds {
            command.dispatch(&mut backend);
        }
        assert_eq!(backend.loops.len(), 2);
        assert!(backend.loops.iter().all(|(_, volume)| *volume > 0.0));
    }

    #[test]
    fn test_autopilot_plays_whole_round() {
        let mut session = session();
        session.set_autopilot(Some(Autopilot::new(3)));
        session.press_start();
        for _ in 0..120_000 {
            session.frame(FRAME_MS);
            if session.state().phase == GamePhase::Over {
                break;
            }
        }
        assert_eq!(session.state().phase, GamePhase::Over);
    }

    #[test]
    fn test_resize_passes_through() {
        let mut session = session();
        session.resize(1000.0, 500.0);
        let view = session.view();
        assert_eq!(view.track.x, 500.0);
        assert_eq!(view.dot, Vec2::new(500.0, 250.0));
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut session = session();
        session.frame(f64::NAN);
        session.frame(-50.0);
        assert_eq!(session.timers().now_ms(), 0.0);
    }
}
