//! Kira-backed audio output

use std::collections::HashMap;
use std::path::Path;

use kira::manager::{AudioManager as Mixer, AudioManagerSettings, backend::DefaultBackend};
use kira::sound::PlaybackState;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::tween::Tween;

use super::{AudioBackend, AudioError, MUSIC_CLIP, SoundEffect};

/// Sound effects and a music loop played through the default output device
pub struct KiraBackend {
    mixer: Mixer<DefaultBackend>,
    clips: HashMap<SoundEffect, StaticSoundData>,
    music: Option<StaticSoundData>,
    music_handle: Option<StaticSoundHandle>,
    active: Vec<StaticSoundHandle>,
}

fn load_clip(dir: &Path, clip: &'static str) -> Result<StaticSoundData, AudioError> {
    StaticSoundData::from_file(dir.join(clip)).map_err(|e| AudioError::Load {
        clip,
        message: e.to_string(),
    })
}

impl KiraBackend {
    /// Open the default device and load clips from `dir`.
    ///
    /// Both effect clips are required. The music track is optional; without
    /// it only effects play.
    pub fn open(dir: &Path) -> Result<Self, AudioError> {
        let mixer = Mixer::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::NoDevice(e.to_string()))?;

        let mut clips = HashMap::new();
        for effect in [SoundEffect::Shot, SoundEffect::Explosion] {
            clips.insert(effect, load_clip(dir, effect.clip_name())?);
        }

        let music = match load_clip(dir, MUSIC_CLIP) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("{}; playing without music", e);
                None
            }
        };

        log::info!("Audio ready ({} clips from {})", clips.len(), dir.display());
        Ok(Self {
            mixer,
            clips,
            music,
            music_handle: None,
            active: Vec::new(),
        })
    }

    /// Drop handles of effects that finished playing
    fn cleanup(&mut self) {
        self.active
            .retain(|handle| handle.state() != PlaybackState::Stopped);
    }
}

impl AudioBackend for KiraBackend {
    fn play_clip(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        self.cleanup();
        let data = self
            .clips
            .get(&effect)
            .ok_or(AudioError::MissingClip(effect.clip_name()))?;
        let settings = StaticSoundSettings::new().volume(volume as f64);
        let handle = self
            .mixer
            .play(data.clone().with_settings(settings))
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        self.active.push(handle);
        Ok(())
    }

    fn play_music(&mut self, volume: f32) -> Result<(), AudioError> {
        let data = self.music.clone().ok_or(AudioError::MissingClip(MUSIC_CLIP))?;
        if let Some(mut playing) = self.music_handle.take() {
            let _ = playing.stop(Tween::default());
        }
        let settings = StaticSoundSettings::new()
            .loop_region(..)
            .volume(volume as f64);
        let handle = self
            .mixer
            .play(data.with_settings(settings))
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        self.music_handle = Some(handle);
        Ok(())
    }
}

/// Open the device backend, or `None` (logged) when there is no device or a
/// required clip is missing
pub fn open_backend(dir: &Path) -> Option<Box<dyn AudioBackend>> {
    match KiraBackend::open(dir) {
        Ok(backend) => Some(Box::new(backend)),
        Err(e) => {
            log::warn!("Audio unavailable: {}", e);
            None
        }
    }
}
