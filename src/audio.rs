//! Sound cue selection
//!
//! Decides which sound goes with which game event and how loud it plays.
//! Actual playback belongs to an `AudioBackend` (the browser on web, a
//! logger on native).

use serde::Serialize;

use crate::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    /// Button press or pointer-down during play
    Click,
    /// Round started
    Start,
    /// Countdown digit shown
    Beep,
    /// Marker bar bounced off a track end
    Hit,
    /// Dot fell off the bar
    GameOver,
    /// Background music, loops from the first start
    Music,
    /// Ambient waves, loops from scene load
    Ambience,
}

/// Mixer channel a sound belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sfx,
    Music,
}

impl SoundEffect {
    /// Asset path as shipped with the web build
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Click => "assets/click.wav",
            SoundEffect::Start => "assets/start.wav",
            SoundEffect::Beep => "assets/beep.wav",
            SoundEffect::Hit => "assets/hit.wav",
            SoundEffect::GameOver => "assets/gameover.wav",
            SoundEffect::Music => "assets/bg.wav",
            SoundEffect::Ambience => "assets/wave.wav",
        }
    }

    pub fn looped(&self) -> bool {
        matches!(self, SoundEffect::Music | SoundEffect::Ambience)
    }

    pub fn channel(&self) -> Channel {
        if self.looped() {
            Channel::Music
        } else {
            Channel::Sfx
        }
    }

    /// Sounds triggered by a game event, in play order
    pub fn for_event(event: &GameEvent) -> &'static [SoundEffect] {
        match event {
            GameEvent::Started { .. } => &[SoundEffect::Click, SoundEffect::Start, SoundEffect::Music],
            GameEvent::CountdownStep { .. } => &[SoundEffect::Beep],
            GameEvent::Click => &[SoundEffect::Click],
            GameEvent::Hit { .. } => &[SoundEffect::Hit],
            GameEvent::GameOver { .. } => &[SoundEffect::GameOver],
            GameEvent::CountdownFinished
            | GameEvent::Launched { .. }
            | GameEvent::ScoreTick { .. }
            | GameEvent::Achievement { .. } => &[],
        }
    }
}

/// A sound ready to hand to the playback layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundCue {
    pub effect: SoundEffect,
    pub asset: &'static str,
    pub volume: f32,
    pub looped: bool,
}

/// Instruction for the playback layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AudioCommand {
    /// Start a one-shot, or a loop that is not running yet
    Play(SoundCue),
    /// Stop a running loop
    Stop { effect: SoundEffect },
    /// Change the volume of a running loop
    SetVolume { effect: SoundEffect, volume: f32 },
}

impl AudioCommand {
    pub fn dispatch(&self, backend: &mut dyn AudioBackend) {
        match self {
            AudioCommand::Play(cue) => backend.play(cue),
            AudioCommand::Stop { effect } => backend.stop(*effect),
            AudioCommand::SetVolume { effect, volume } => backend.set_volume(*effect, *volume),
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, cue: &SoundCue);
    fn stop(&mut self, effect: SoundEffect);
    fn set_volume(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs; used by the native runner
#[derive(Debug, Default)]
pub struct LogBackend {
    pub played: usize,
    /// Loops currently running, with their volume
    pub loops: Vec<(SoundEffect, f32)>,
}

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: &SoundCue) {
        self.played += 1;
        if cue.looped {
            self.loops.push((cue.effect, cue.volume));
        }
        log::debug!("♪ {:?} ({}, vol {:.2})", cue.effect, cue.asset, cue.volume);
    }

    fn stop(&mut self, effect: SoundEffect) {
        self.loops.retain(|(e, _)| *e != effect);
        log::debug!("♪ stop {:?}", effect);
    }

    fn set_volume(&mut self, effect: SoundEffect, volume: f32) {
        for (e, v) in self.loops.iter_mut() {
            if *e == effect {
                *v = volume;
            }
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Loops started and not stopped since
    loops: Vec<SoundEffect>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioManager {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            muted: settings.muted,
            loops: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0); returns volume updates for running loops
    pub fn set_master_volume(&mut self, vol: f32) -> Vec<AudioCommand> {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.loop_volumes()
    }

    /// Mute/unmute all audio; returns volume updates for running loops
    pub fn set_muted(&mut self, muted: bool) -> Vec<AudioCommand> {
        self.muted = muted;
        self.loop_volumes()
    }

    /// Get effective volume
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match effect.channel() {
            Channel::Sfx => self.sfx_volume,
            Channel::Music => self.music_volume,
        };
        self.master_volume * channel
    }

    /// Build a cue. Silent one-shots are dropped; loops always start so a
    /// later unmute can bring them up.
    pub fn cue(&self, effect: SoundEffect) -> Option<SoundCue> {
        let volume = self.effective_volume(effect);
        if volume <= 0.0 && !effect.looped() {
            return None;
        }
        Some(SoundCue {
            effect,
            asset: effect.asset(),
            volume,
            looped: effect.looped(),
        })
    }

    /// Loops currently running
    pub fn loops(&self) -> &[SoundEffect] {
        &self.loops
    }

    /// Start a loop unless it is already running
    pub fn start_loop(&mut self, effect: SoundEffect) -> Option<AudioCommand> {
        if self.loops.contains(&effect) {
            return None;
        }
        let cue = self.cue(effect)?;
        self.loops.push(effect);
        Some(AudioCommand::Play(cue))
    }

    /// Stop every running loop
    pub fn stop_loops(&mut self) -> Vec<AudioCommand> {
        self.loops
            .drain(..)
            .map(|effect| AudioCommand::Stop { effect })
            .collect()
    }

    /// Commands for a batch of events, in order
    pub fn commands_for(&mut self, events: &[GameEvent]) -> Vec<AudioCommand> {
        let mut commands = Vec::new();
        for &effect in events.iter().flat_map(|e| SoundEffect::for_event(e).iter()) {
            let command = if effect.looped() {
                self.start_loop(effect)
            } else {
                self.cue(effect).map(AudioCommand::Play)
            };
            commands.extend(command);
        }
        commands
    }

    fn loop_volumes(&self) -> Vec<AudioCommand> {
        self.loops
            .iter()
            .map(|&effect| AudioCommand::SetVolume {
                effect,
                volume: self.effective_volume(effect),
            })
            .collect()
    }
}
