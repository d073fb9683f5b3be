use std::fmt;

/// Rejected engine or host configuration.
///
/// Raised before a stream is ever installed; the render path itself has no
/// error states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    InvalidSampleRate { sample_rate: f32 },
    FrequencyOutOfRange { frequency_hz: f32 },
    PlayDurationOutOfRange { seconds: f32 },
    WaitDurationOutOfRange { seconds: f32 },
    AmplitudeOutOfRange { percent: f32 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidSampleRate { sample_rate } => {
                write!(f, "sample rate must be positive, got {sample_rate}")
            }
            ConfigurationError::FrequencyOutOfRange { frequency_hz } => {
                write!(f, "frequency {frequency_hz} Hz is outside 1..=30000 Hz")
            }
            ConfigurationError::PlayDurationOutOfRange { seconds } => {
                write!(f, "play duration {seconds} s is outside 0.1..=10 s")
            }
            ConfigurationError::WaitDurationOutOfRange { seconds } => {
                write!(f, "wait duration {seconds} s is outside 0..=3600 s")
            }
            ConfigurationError::AmplitudeOutOfRange { percent } => {
                write!(f, "amplitude {percent}% is outside 0..=100%")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
