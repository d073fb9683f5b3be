//! Noise colour filters driven by a uniform white source.

use rand::{rngs::SmallRng, Rng, SeedableRng};

/*
Coloured Noise
==============

All three noise types start from the same raw material: white noise, a stream
of independent uniform random values in [-1, 1]. Colour comes from filtering.

Vocabulary
----------

  white     Equal power per Hz. Sounds like hiss. No memory between samples.

  pink      Equal power per octave (power falls 3 dB per octave, 1/f).
            Sounds like rain or wind.

  brown     Power falls 6 dB per octave (1/f²). A random walk.
            Sounds like a distant waterfall or rumble.


Pink: Parallel One-Pole Cascade
-------------------------------

A true 1/f slope needs an infinite number of poles. Paul Kellet's "refined"
approximation gets within ±0.05 dB above 9.2 Hz with seven terms: six leaky
integrators tuned to different corner frequencies, summed with a direct path
and a one-sample delayed path.

    b0 = 0.99886·b0 + w·0.0555179      (slowest pole)
    b1 = 0.99332·b1 + w·0.0750759
    b2 = 0.96900·b2 + w·0.1538520
    b3 = 0.86650·b3 + w·0.3104856
    b4 = 0.55000·b4 + w·0.5329522
    b5 = -0.7616·b5 - w·0.0168980      (fastest, alternating sign)
    out = b0 + b1 + b2 + b3 + b4 + b5 + b6 + w·0.5362
    b6 = w·0.115926                    (delay tap for the NEXT sample)

The summed cascade has a gain of roughly 9, so the output is scaled by 0.11
to bring it back near the loudness of the white source.


Brown: Leaky Integrator
-----------------------

Integrating white noise gives brown noise, but a pure integrator drifts off to
infinity. Dividing by 1.02 every step leaks a little energy so the walk stays
centred:

    last = (last + 0.02·w) / 1.02

The steady-state swing is small, but nothing bounds it in theory, so the output
is clamped to [-1, 1].
*/

/// Uniform white noise source.
///
/// Wraps a small, fast PRNG so draws are allocation-free and lock-free.
#[derive(Debug, Clone)]
pub struct WhiteSource {
    rng: SmallRng,
}

impl WhiteSource {
    /// Seeded from OS entropy. Call this off the audio thread.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic source, for tests and offline renders.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

const PINK_GAIN: f32 = 0.11;

/// Kellet pink noise filter state (`b0..b6`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinkFilter {
    b: [f32; 7],
}

impl PinkFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter one white sample `w` into a pink sample.
    #[inline]
    pub fn process(&mut self, w: f32) -> f32 {
        let b = &mut self.b;
        b[0] = 0.99886 * b[0] + w * 0.0555179;
        b[1] = 0.99332 * b[1] + w * 0.0750759;
        b[2] = 0.96900 * b[2] + w * 0.1538520;
        b[3] = 0.86650 * b[3] + w * 0.3104856;
        b[4] = 0.55000 * b[4] + w * 0.5329522;
        b[5] = -0.7616 * b[5] - w * 0.0168980;
        let out = b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + b[6] + w * 0.5362;
        b[6] = w * 0.115926;

        (out * PINK_GAIN).clamp(-1.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.b = [0.0; 7];
    }

    /// Current filter taps, `b0` first.
    pub fn taps(&self) -> [f32; 7] {
        self.b
    }
}

/// Leaky integrator producing brown noise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrownIntegrator {
    last_output: f32,
}

impl BrownIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, w: f32) -> f32 {
        self.last_output = (self.last_output + 0.02 * w) / 1.02;
        self.last_output.clamp(-1.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.last_output = 0.0;
    }

    /// Unclamped integrator state.
    pub fn last_output(&self) -> f32 {
        self.last_output
    }
}
