#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{
    dsp::SignalType,
    engine::{
        params::{FREQUENCY_RANGE_HZ, PLAY_DURATION_RANGE_S, WAIT_DURATION_RANGE_S},
        EngineParameters,
    },
    error::ConfigurationError,
};

/// Parameter change sent from the control thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamMessage {
    SignalType(SignalType),
    Frequency(f32),
    Periodic(bool),
    PlayDuration(f32),
    WaitDuration(f32),
    /// Output gain, 0.0 to 1.0, applied after synthesis.
    Gain(f32),
    /// Replace every engine parameter at once.
    Parameters(EngineParameters),
}

impl ParamMessage {
    /// Range-check the payload before it is queued. The audio thread trusts
    /// whatever arrives.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            ParamMessage::SignalType(_) | ParamMessage::Periodic(_) => Ok(()),
            ParamMessage::Frequency(frequency_hz) => {
                if FREQUENCY_RANGE_HZ.contains(&frequency_hz) {
                    Ok(())
                } else {
                    Err(ConfigurationError::FrequencyOutOfRange { frequency_hz })
                }
            }
            ParamMessage::PlayDuration(seconds) => {
                if PLAY_DURATION_RANGE_S.contains(&seconds) {
                    Ok(())
                } else {
                    Err(ConfigurationError::PlayDurationOutOfRange { seconds })
                }
            }
            ParamMessage::WaitDuration(seconds) => {
                if WAIT_DURATION_RANGE_S.contains(&seconds) {
                    Ok(())
                } else {
                    Err(ConfigurationError::WaitDurationOutOfRange { seconds })
                }
            }
            ParamMessage::Gain(gain) => validate_gain(gain),
            ParamMessage::Parameters(params) => params.validate(),
        }
    }

    /// Fold this change into the audio-side snapshot.
    pub fn apply(self, params: &mut EngineParameters, gain: &mut f32) {
        match self {
            ParamMessage::SignalType(signal) => params.signal_type = signal,
            ParamMessage::Frequency(hz) => params.frequency_hz = hz,
            ParamMessage::Periodic(enabled) => params.periodic_enabled = enabled,
            ParamMessage::PlayDuration(seconds) => params.play_duration_s = seconds,
            ParamMessage::WaitDuration(seconds) => params.wait_duration_s = seconds,
            ParamMessage::Gain(value) => *gain = value.clamp(0.0, 1.0),
            ParamMessage::Parameters(next) => *params = next,
        }
    }
}

/// Output gain must lie in [0, 1].
pub fn validate_gain(gain: f32) -> Result<(), ConfigurationError> {
    if (0.0..=1.0).contains(&gain) {
        Ok(())
    } else {
        Err(ConfigurationError::AmplitudeOutOfRange {
            percent: gain * 100.0,
        })
    }
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ParamMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ParamMessage> {
    fn pop(&mut self) -> Option<ParamMessage> {
        Consumer::pop(self).ok()
    }
}

/// A receiver that never has anything to deliver, for fixed-parameter renders.
impl MessageReceiver for () {
    fn pop(&mut self) -> Option<ParamMessage> {
        None
    }
}
