use std::ops::RangeInclusive;

use crate::{dsp::SignalType, error::ConfigurationError};

pub const FREQUENCY_RANGE_HZ: RangeInclusive<f32> = 1.0..=30_000.0;
pub const PLAY_DURATION_RANGE_S: RangeInclusive<f32> = 0.1..=10.0;
pub const WAIT_DURATION_RANGE_S: RangeInclusive<f32> = 0.0..=3_600.0;

/// Live-tunable engine configuration, sampled once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParameters {
    pub signal_type: SignalType,
    /// Tone frequency for sine, impulse rate for fluctuate. Ignored by noise.
    pub frequency_hz: f32,
    pub periodic_enabled: bool,
    pub play_duration_s: f32,
    pub wait_duration_s: f32,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            signal_type: SignalType::Zero,
            frequency_hz: 50.0,
            periodic_enabled: false,
            play_duration_s: 0.5,
            wait_duration_s: 9.0 * 60.0,
        }
    }
}

impl EngineParameters {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !FREQUENCY_RANGE_HZ.contains(&self.frequency_hz) {
            return Err(ConfigurationError::FrequencyOutOfRange {
                frequency_hz: self.frequency_hz,
            });
        }
        if !PLAY_DURATION_RANGE_S.contains(&self.play_duration_s) {
            return Err(ConfigurationError::PlayDurationOutOfRange {
                seconds: self.play_duration_s,
            });
        }
        if !WAIT_DURATION_RANGE_S.contains(&self.wait_duration_s) {
            return Err(ConfigurationError::WaitDurationOutOfRange {
                seconds: self.wait_duration_s,
            });
        }
        Ok(())
    }
}
