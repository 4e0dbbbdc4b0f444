//! Player settings and preferences
//!
//! Read from a JSON file next to the binary. A missing or broken file is never
//! fatal: the defaults are used and the problem is logged.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Errors raised while reading a JSON configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read and parse a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Read a JSON file, falling back to `T::default()` with a warning
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    match read_json(path) {
        Ok(value) => {
            log::info!("Loaded {} from {}", what, path.display());
            value
        }
        Err(e) => {
            log::warn!("{}; using default {}", e, what);
            T::default()
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Directory holding shoot.wav, explosion.wav and background_music.wav
    pub sound_dir: PathBuf,
    /// Mute all audio
    pub muted: bool,

    // === Rendering ===
    /// Optional Wavefront OBJ used for enemies (procedural fighter otherwise)
    pub enemy_mesh: Option<PathBuf>,
    /// Draw the health/score overlay
    pub show_hud: bool,

    // === Simulation ===
    /// Fixed run seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.5,
            music_volume: 0.3,
            sound_dir: PathBuf::from("."),
            muted: false,
            enemy_mesh: None,
            show_hud: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file (defaults on any error)
    pub fn load(path: &Path) -> Self {
        let mut settings: Self = load_or_default(path, "settings");
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        settings
    }

    /// Effective sound effect volume (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
