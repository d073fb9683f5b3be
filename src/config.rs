//! Persisted host settings and presets.
//!
//! The engine only understands [`EngineParameters`]. Everything the user edits
//! (amplitude in percent, wait time in minutes, the output device) lives here
//! and is converted at the boundary.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{dsp::SignalType, engine::EngineParameters, error::ConfigurationError};

/// Device id meaning "whatever the host reports as default".
pub const DEFAULT_DEVICE: &str = "default";

const CONFIG_DIR: &str = "sound-keeper";
const CONFIG_FILE: &str = "config.json";

/// User-facing configuration, stored as JSON.
///
/// Missing fields take their value from [`AudioConfig::default`], so an old or
/// hand-written file only needs the fields it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioConfig {
    pub stream_type: SignalType,
    /// Hz
    pub frequency: f32,
    /// Percent, 0 to 100
    pub amplitude: f32,
    pub is_periodic: bool,
    /// Seconds
    pub play_duration: f32,
    /// Minutes
    pub wait_duration: f32,
    pub device_id: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            stream_type: SignalType::Sine,
            frequency: 24_500.0,
            amplitude: 50.0,
            is_periodic: true,
            play_duration: 0.5,
            wait_duration: 9.0,
            device_id: DEFAULT_DEVICE.to_string(),
        }
    }
}

impl AudioConfig {
    /// Engine-side view: wait time converted from minutes to seconds.
    pub fn engine_parameters(&self) -> EngineParameters {
        EngineParameters {
            signal_type: self.stream_type,
            frequency_hz: self.frequency,
            periodic_enabled: self.is_periodic,
            play_duration_s: self.play_duration,
            wait_duration_s: self.wait_duration * 60.0,
        }
    }

    /// Linear output gain, 0.0 to 1.0.
    pub fn gain(&self) -> f32 {
        (self.amplitude / 100.0).clamp(0.0, 1.0)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=100.0).contains(&self.amplitude) {
            return Err(ConfigurationError::AmplitudeOutOfRange {
                percent: self.amplitude,
            });
        }
        self.engine_parameters().validate()
    }

    /// Name of the requested output device, `None` for the host default.
    pub fn device_name(&self) -> Option<&str> {
        match self.device_id.as_str() {
            "" | DEFAULT_DEVICE => None,
            name => Some(name),
        }
    }

    /// Switch signal type, resetting every other setting to its default but
    /// keeping the selected device.
    pub fn with_stream_type(&self, stream_type: SignalType) -> Self {
        Self {
            stream_type,
            device_id: self.device_id.clone(),
            ..Self::default()
        }
    }

    /// Whether moving from `self` to `next` needs a fresh stream rather than a
    /// live parameter update. Type and device changes rebuild the engine.
    pub fn requires_restart(&self, next: &AudioConfig) -> bool {
        self.stream_type != next.stream_type || self.device_id != next.device_id
    }

    /// Read a config file, falling back to defaults if it is missing or
    /// malformed.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!(
                        "Failed to parse saved config {}, using defaults: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No saved config at {}", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Failed to read {}, using defaults: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Throw away the saved settings and write the defaults in their place.
    pub fn reset(path: &Path) -> io::Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

/// Platform config location, e.g. `~/.config/sound-keeper/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Fields a preset overrides. `None` leaves the current value alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PresetConfig {
    pub stream_type: Option<SignalType>,
    pub frequency: Option<f32>,
    pub amplitude: Option<f32>,
    pub is_periodic: Option<bool>,
    pub play_duration: Option<f32>,
    pub wait_duration: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub label: &'static str,
    pub config: PresetConfig,
}

impl Preset {
    /// Overlay this preset on `base`.
    pub fn apply(&self, base: &AudioConfig) -> AudioConfig {
        let p = &self.config;
        AudioConfig {
            stream_type: p.stream_type.unwrap_or(base.stream_type),
            frequency: p.frequency.unwrap_or(base.frequency),
            amplitude: p.amplitude.unwrap_or(base.amplitude),
            is_periodic: p.is_periodic.unwrap_or(base.is_periodic),
            play_duration: p.play_duration.unwrap_or(base.play_duration),
            wait_duration: p.wait_duration.unwrap_or(base.wait_duration),
            device_id: base.device_id.clone(),
        }
    }
}

pub const PRESETS: [Preset; 2] = [
    Preset {
        label: "15 Hz Sine Wave (Subsonic)",
        config: PresetConfig {
            stream_type: Some(SignalType::Sine),
            frequency: Some(15.0),
            amplitude: Some(0.5),
            is_periodic: Some(false),
            play_duration: None,
            wait_duration: None,
        },
    },
    Preset {
        label: "Periodic Pulse (24.5kHz, 50%)",
        config: PresetConfig {
            stream_type: Some(SignalType::Sine),
            frequency: Some(24_500.0),
            amplitude: Some(50.0),
            is_periodic: Some(true),
            play_duration: Some(0.5),
            wait_duration: Some(9.0),
        },
    },
];
