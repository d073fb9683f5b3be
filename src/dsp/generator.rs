use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::noise::{BrownIntegrator, PinkFilter, WhiteSource};

/*
Keep-Alive Signal Generator
===========================

Many audio interfaces, USB DACs and HDMI sinks power down their output stage
after a few seconds of silence. When they wake again the first fraction of a
second of real audio is lost, or the device pops. The generator produces a
signal that keeps the device convinced it is in use.

Signal Types and What They Are For:
-----------------------------------

Zero: Digital silence.
  - Every sample is exactly 0.0.
  - Works on devices that only watch whether a stream is open, not what it
    carries. Devices with silence detection will still sleep.

Fluctuate: An almost-silent impulse train.
  - Zero everywhere except once per interval, where it emits the smallest
    step a 24-bit converter can represent (1/8388607), alternating sign.
  - Inaudible, but never bit-exact silence, which defeats most silence
    detectors.

Sine: A pure tone.
  - Subsonic (e.g. 15 Hz) or ultrasonic (e.g. 24.5 kHz) frequencies are
    typical: the device sees energy, the listener hears nothing.

White / Pink / Brown noise: Broadband signals.
  - Useful when a device filters out pure tones. See `noise.rs`.


Fluctuate Timing
----------------

    interval = max(1, floor(sample_rate / frequency))

    frame:   0   1   2   3   4   5   6   7   8   ...
    (interval = 4)
    value:  +ε   0   0   0  -ε   0   0   0  +ε   ...

The sign follows the interval index, so it depends only on the absolute frame
number and is the same no matter how the stream is split into blocks.


Sine Phase Wrap
---------------

Phase advances by 2π·f/sr every sample. Once it passes 2π we subtract 2π
exactly once. For any frequency below the sample rate a single subtraction is
enough; the engine clamps frequency to the sample rate so this holds.
*/

/// Smallest non-zero step of a 24-bit signed converter.
pub const FLUCTUATE_AMPLITUDE: f32 = 1.0 / 8_388_607.0;

/// Which keep-alive signal to synthesize.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignalType {
    #[default]
    Zero,
    Fluctuate,
    Sine,
    WhiteNoise,
    PinkNoise,
    BrownNoise,
}

impl SignalType {
    pub const ALL: [SignalType; 6] = [
        SignalType::Zero,
        SignalType::Fluctuate,
        SignalType::Sine,
        SignalType::WhiteNoise,
        SignalType::PinkNoise,
        SignalType::BrownNoise,
    ];

    /// Stable numeric code used on the parameter channel.
    pub fn code(self) -> u8 {
        match self {
            SignalType::Zero => 0,
            SignalType::Fluctuate => 1,
            SignalType::Sine => 2,
            SignalType::WhiteNoise => 3,
            SignalType::PinkNoise => 4,
            SignalType::BrownNoise => 5,
        }
    }

    /// Inverse of [`SignalType::code`]. Unknown codes fall back to silence.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => SignalType::Fluctuate,
            2 => SignalType::Sine,
            3 => SignalType::WhiteNoise,
            4 => SignalType::PinkNoise,
            5 => SignalType::BrownNoise,
            _ => SignalType::Zero,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalType::Zero => "Zero (Silence)",
            SignalType::Fluctuate => "Fluctuate",
            SignalType::Sine => "Sine Wave",
            SignalType::WhiteNoise => "White Noise",
            SignalType::PinkNoise => "Pink Noise",
            SignalType::BrownNoise => "Brown Noise",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SignalType::Zero => {
                "Plays a stream of absolute silence. May not work on all systems."
            }
            SignalType::Fluctuate => "Plays zeroes with tiny non-zero samples. Usually inaudible.",
            SignalType::Sine => {
                "A pure tone. Can be audible depending on frequency and amplitude."
            }
            SignalType::WhiteNoise => {
                "Static-like sound with equal energy across all frequencies."
            }
            SignalType::PinkNoise => {
                "Deeper than white noise, often found in nature (wind, rain)."
            }
            SignalType::BrownNoise => "Even deeper, like a heavy waterfall or thunder.",
        }
    }
}

/// Mutable synthesis state for one stream.
///
/// Owned by exactly one engine and passed by `&mut` into
/// [`GeneratorState::next_sample`]; never shared between streams.
#[derive(Debug, Clone)]
pub struct GeneratorState {
    sample_rate: f32,
    phase: f32,
    pink: PinkFilter,
    brown: BrownIntegrator,
    white: WhiteSource,
}

impl GeneratorState {
    /// Noise seeded from OS entropy.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_source(sample_rate, WhiteSource::from_entropy())
    }

    /// Deterministic noise, for tests and offline renders.
    pub fn with_seed(sample_rate: f32, seed: u64) -> Self {
        Self::with_source(sample_rate, WhiteSource::with_seed(seed))
    }

    fn with_source(sample_rate: f32, white: WhiteSource) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            pink: PinkFilter::new(),
            brown: BrownIntegrator::new(),
            white,
        }
    }

    /// Produce one raw sample in [-1, 1] and advance the state for `signal`.
    ///
    /// `absolute_frame` is only read by [`SignalType::Fluctuate`].
    #[inline]
    pub fn next_sample(&mut self, signal: SignalType, frequency_hz: f32, absolute_frame: u64) -> f32 {
        match signal {
            SignalType::Zero => 0.0,
            SignalType::Fluctuate => self.fluctuate(frequency_hz, absolute_frame),
            SignalType::Sine => self.sine(frequency_hz),
            SignalType::WhiteNoise => self.white.next_sample(),
            SignalType::PinkNoise => {
                let w = self.white.next_sample();
                self.pink.process(w)
            }
            SignalType::BrownNoise => {
                let w = self.white.next_sample();
                self.brown.process(w)
            }
        }
    }

    /// Return the state belonging to `signal` to its initial value.
    pub fn reset(&mut self, signal: SignalType) {
        match signal {
            SignalType::Sine => self.phase = 0.0,
            SignalType::PinkNoise => self.pink.reset(),
            SignalType::BrownNoise => self.brown.reset(),
            SignalType::Zero | SignalType::Fluctuate | SignalType::WhiteNoise => {}
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn pink(&self) -> &PinkFilter {
        &self.pink
    }

    pub fn brown(&self) -> &BrownIntegrator {
        &self.brown
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn fluctuate(&self, frequency_hz: f32, absolute_frame: u64) -> f32 {
        let interval = fluctuate_interval(self.sample_rate, frequency_hz);
        if absolute_frame % interval != 0 {
            return 0.0;
        }

        if (absolute_frame / interval) % 2 == 0 {
            FLUCTUATE_AMPLITUDE
        } else {
            -FLUCTUATE_AMPLITUDE
        }
    }

    fn sine(&mut self, frequency_hz: f32) -> f32 {
        let value = self.phase.sin();
        self.phase += TAU * frequency_hz / self.sample_rate;
        if self.phase > TAU {
            self.phase -= TAU;
        }
        value
    }
}

/// Frames between fluctuate impulses: `max(1, floor(sample_rate / frequency))`.
pub fn fluctuate_interval(sample_rate: f32, frequency_hz: f32) -> u64 {
    let frames = (sample_rate / frequency_hz).floor();
    if frames.is_finite() && frames >= 1.0 {
        frames as u64
    } else {
        1
    }
}
