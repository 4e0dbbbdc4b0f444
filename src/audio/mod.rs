//! Sound effect dispatch and background music
//!
//! The simulation only emits `GameEvent`s. This module turns the two audible
//! ones into fire-and-forget playback requests and keeps a music loop that
//! restarts with every new run. Audio is optional: without a backend, or when
//! the backend fails, playback is a silent no-op.

#[cfg(all(feature = "audio-device", not(target_arch = "wasm32")))]
mod device;

#[cfg(all(feature = "audio-device", not(target_arch = "wasm32")))]
pub use device::{KiraBackend, open_backend};

/// Without a device backend compiled in, audio is always disabled
#[cfg(not(all(feature = "audio-device", not(target_arch = "wasm32"))))]
pub fn open_backend(_dir: &std::path::Path) -> Option<Box<dyn AudioBackend>> {
    log::warn!("Built without audio-device support - audio disabled");
    None
}

use crate::settings::Settings;
use crate::sim::{GameEvent, TickOutcome};

/// Looping background track
pub const MUSIC_CLIP: &str = "background_music.wav";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player bullet fired
    Shot,
    /// Enemy destroyed by a bullet
    Explosion,
}

impl SoundEffect {
    /// Effect for a simulation event, if that event is audible
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired => Some(SoundEffect::Shot),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::Explosion),
            _ => None,
        }
    }

    /// Conventional clip file name
    pub fn clip_name(&self) -> &'static str {
        match self {
            SoundEffect::Shot => "shoot.wav",
            SoundEffect::Explosion => "explosion.wav",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no output device: {0}")]
    NoDevice(String),
    #[error("clip {0} is not loaded")]
    MissingClip(&'static str),
    #[error("failed to load {clip}: {message}")]
    Load { clip: &'static str, message: String },
    #[error("playback failed: {0}")]
    Playback(String),
}

/// A device that can play clips and a music loop
pub trait AudioBackend {
    fn play_clip(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;

    /// Start the music loop from the top, replacing any loop already playing
    fn play_music(&mut self, volume: f32) -> Result<(), AudioError>;
}

/// Receiver of sound effect requests
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Failed playback attempts (kept for diagnostics)
    failures: u32,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,
            failures: 0,
        }
    }

    /// Build from settings
    pub fn from_settings(backend: Option<Box<dyn AudioBackend>>, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume
    pub fn music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Play the effects for a tick's events
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// (Re)start the music loop from the beginning
    pub fn start_music(&mut self) {
        let vol = self.music_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play_music(vol) {
            self.failures += 1;
            log::warn!("Could not play {}: {}", MUSIC_CLIP, e);
        }
    }

    /// Audio for one tick: the tick's effects, and fresh music on a new run
    pub fn on_tick(&mut self, outcome: &TickOutcome, events: &[GameEvent]) {
        if outcome.reset {
            self.start_music();
        }
        self.dispatch(events);
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play_clip(effect, vol) {
            self.failures += 1;
            log::warn!("Could not play {}: {}", effect.clip_name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(SoundEffect, f32)>>>;

    #[derive(Default)]
    struct Recorder {
        clips: Log,
        music: Rc<RefCell<Vec<f32>>>,
    }

    impl Recorder {
        fn shared(&self) -> Self {
            Self {
                clips: self.clips.clone(),
                music: self.music.clone(),
            }
        }
    }

    impl AudioBackend for Recorder {
        fn play_clip(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
            self.clips.borrow_mut().push((effect, volume));
            Ok(())
        }

        fn play_music(&mut self, volume: f32) -> Result<(), AudioError> {
            self.music.borrow_mut().push(volume);
            Ok(())
        }
    }

    struct Broken;

    impl AudioBackend for Broken {
        fn play_clip(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
            Err(AudioError::MissingClip(effect.clip_name()))
        }

        fn play_music(&mut self, _volume: f32) -> Result<(), AudioError> {
            Err(AudioError::Playback("device lost".into()))
        }
    }

    fn events() -> Vec<GameEvent> {
        vec![
            GameEvent::ShotFired,
            GameEvent::PlayerHit { health: 2 },
            GameEvent::EnemyDestroyed { pos: Vec3::ZERO },
        ]
    }

    #[test]
    fn test_dispatch_maps_audible_events() {
        let rec = Recorder::default();
        let mut audio = AudioManager::new(Some(Box::new(rec.shared())));
        audio.set_sfx_volume(0.5);
        audio.dispatch(&events());

        let played = rec.clips.borrow();
        assert_eq!(played.len(), 2);
        assert_eq!(played[0].0, SoundEffect::Shot);
        assert_eq!(played[1].0, SoundEffect::Explosion);
        assert!((played[0].1 - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let rec = Recorder::default();
        let mut audio = AudioManager::new(Some(Box::new(rec.shared())));
        audio.set_muted(true);
        audio.dispatch(&events());
        audio.start_music();
        assert!(rec.clips.borrow().is_empty());
        assert!(rec.music.borrow().is_empty());
    }

    #[test]
    fn test_music_restarts_on_reset_only() {
        let rec = Recorder::default();
        let settings = Settings::default();
        let mut audio = AudioManager::from_settings(Some(Box::new(rec.shared())), &settings);
        audio.start_music();

        let simulated = TickOutcome {
            simulated: true,
            ..Default::default()
        };
        audio.on_tick(&simulated, &[GameEvent::ShotFired]);
        assert_eq!(rec.music.borrow().len(), 1);
        assert_eq!(rec.clips.borrow().len(), 1);

        let reset = TickOutcome {
            reset: true,
            ..Default::default()
        };
        audio.on_tick(&reset, &[]);
        let music = rec.music.borrow();
        assert_eq!(music.len(), 2);
        assert!((music[1] - 0.8 * 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_missing_backend_is_silent() {
        let mut audio = AudioManager::new(None);
        assert!(!audio.is_enabled());
        audio.dispatch(&events());
        assert_eq!(audio.failures(), 0);
    }

    #[test]
    fn test_backend_errors_are_swallowed() {
        let mut audio = AudioManager::new(Some(Box::new(Broken)));
        audio.dispatch(&events());
        audio.start_music();
        assert_eq!(audio.failures(), 3);
    }
}
