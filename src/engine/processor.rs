use crate::{
    dsp::{GateTiming, GeneratorState, SignalType},
    engine::EngineParameters,
    error::ConfigurationError,
};

/*
Frame Processor
===============

The processor is what the audio callback actually calls. Each call hands it one
block of output frames and the current parameter snapshot.

Per block:
  1. Read the parameters ONCE (k-rate). A change made by the control thread
     halfway through a block is picked up by the next block, never mid-block.
  2. Convert the gate timing to whole frames and fold the sine frequency
     below the sample rate.
  3. If the signal type changed since the last block, reset that type's state.

Per frame:
  4. absolute = frame_counter + i
  5. Ask the gate whether this frame is audible and what the envelope is.
  6. If audible, pull one sample from the generator and scale it.
  7. Write the same value to every channel (mono broadcast).

After the block:
  8. frame_counter += frames

Because every per-frame decision uses the absolute frame index, rendering
1024 frames in one call or in eight calls of 128 gives identical output.
*/

/// One keep-alive synthesis stream.
///
/// Owns its generator state and frame counter exclusively. Construct one per
/// output stream and rebuild it on structural changes (device, sample rate).
pub struct KeepAliveEngine {
    sample_rate: f32,
    state: GeneratorState,
    active_signal: Option<SignalType>,
    frame_counter: u64,
}

/// Per-block values derived from the parameter snapshot.
#[derive(Debug, Clone, Copy)]
struct BlockPlan {
    signal: SignalType,
    frequency_hz: f32,
    timing: GateTiming,
}

impl KeepAliveEngine {
    /// Engine with entropy-seeded noise. Build it before starting the stream.
    pub fn new(sample_rate: f32) -> Result<Self, ConfigurationError> {
        validate_sample_rate(sample_rate)?;
        Ok(Self::with_state(sample_rate, GeneratorState::new(sample_rate)))
    }

    /// Engine with deterministic noise.
    pub fn with_seed(sample_rate: f32, seed: u64) -> Result<Self, ConfigurationError> {
        validate_sample_rate(sample_rate)?;
        Ok(Self::with_state(
            sample_rate,
            GeneratorState::with_seed(sample_rate, seed),
        ))
    }

    fn with_state(sample_rate: f32, state: GeneratorState) -> Self {
        Self {
            sample_rate,
            state,
            active_signal: None,
            frame_counter: 0,
        }
    }

    /// Render one planar block: one slice per channel.
    ///
    /// The block length is the shortest channel. Always returns `true`; the
    /// engine never ends a stream on its own.
    pub fn process(&mut self, output: &mut [&mut [f32]], params: &EngineParameters) -> bool {
        let frames = match output.iter().map(|channel| channel.len()).min() {
            Some(frames) => frames,
            None => return true,
        };

        let plan = self.begin_block(params);
        for i in 0..frames {
            let sample = self.render_frame(&plan, self.frame_counter + i as u64);
            for channel in output.iter_mut() {
                channel[i] = sample;
            }
        }

        self.frame_counter += frames as u64;
        true
    }

    /// Render one interleaved block of `channels`-wide frames, as cpal delivers
    /// them. Trailing samples that do not fill a whole frame are zeroed.
    pub fn process_interleaved(
        &mut self,
        data: &mut [f32],
        channels: usize,
        params: &EngineParameters,
    ) -> bool {
        if channels == 0 {
            return true;
        }

        let plan = self.begin_block(params);
        let mut frames = 0u64;
        let mut chunks = data.chunks_exact_mut(channels);
        for frame in &mut chunks {
            let sample = self.render_frame(&plan, self.frame_counter + frames);
            frame.fill(sample);
            frames += 1;
        }
        chunks.into_remainder().fill(0.0);

        self.frame_counter += frames;
        true
    }

    /// Absolute index of the next frame to be rendered.
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    fn begin_block(&mut self, params: &EngineParameters) -> BlockPlan {
        if self.active_signal != Some(params.signal_type) {
            if self.active_signal.is_some() {
                self.state.reset(params.signal_type);
            }
            self.active_signal = Some(params.signal_type);
        }

        BlockPlan {
            signal: params.signal_type,
            frequency_hz: self.block_frequency(params.signal_type, params.frequency_hz),
            timing: GateTiming::new(
                params.periodic_enabled,
                params.play_duration_s,
                params.wait_duration_s,
                self.sample_rate,
            ),
        }
    }

    /// Frequency handed to the generator for this block.
    ///
    /// A non-finite value would poison the sine phase for good, so it renders
    /// as 0 Hz. Sine frequencies at or above the sample rate are folded back
    /// into `[0, sample_rate)`: the phase step is identical modulo 2π, so the
    /// aliased tone is unchanged and the wrap stays a single subtraction.
    fn block_frequency(&self, signal: SignalType, frequency_hz: f32) -> f32 {
        if !frequency_hz.is_finite() {
            return 0.0;
        }
        match signal {
            SignalType::Sine => frequency_hz.rem_euclid(self.sample_rate),
            _ => frequency_hz,
        }
    }

    #[inline]
    fn render_frame(&mut self, plan: &BlockPlan, absolute_frame: u64) -> f32 {
        let decision = plan.timing.gate(absolute_frame);
        if !decision.audible {
            return 0.0;
        }

        let raw = self
            .state
            .next_sample(plan.signal, plan.frequency_hz, absolute_frame);
        raw * decision.envelope
    }
}

fn validate_sample_rate(sample_rate: f32) -> Result<(), ConfigurationError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidSampleRate { sample_rate })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(frequency_hz: f32) -> EngineParameters {
        EngineParameters {
            signal_type: SignalType::Sine,
            frequency_hz,
            ..EngineParameters::default()
        }
    }

    #[test]
    fn rejects_non_positive_sample_rate() {
        for rate in [0.0, -44_100.0, f32::NAN] {
            assert!(matches!(
                KeepAliveEngine::new(rate),
                Err(ConfigurationError::InvalidSampleRate { .. })
            ));
        }
    }

    #[test]
    fn planar_channels_receive_identical_samples() {
        let mut engine = KeepAliveEngine::with_seed(SAMPLE_RATE, 1).unwrap();
        let mut left = vec![0.0f32; 256];
        let mut right = vec![1.0f32; 256];

        {
            let mut output = [left.as_mut_slice(), right.as_mut_slice()];
            assert!(engine.process(&mut output, &sine(440.0)));
        }

        assert_eq!(left, right);
        assert!(left.iter().any(|s| s.abs() > 0.5));
        assert_eq!(engine.frame_counter(), 256);
    }

    #[test]
    fn interleaved_frames_are_broadcast() {
        let mut engine = KeepAliveEngine::with_seed(SAMPLE_RATE, 1).unwrap();
        let mut data = vec![0.0f32; 3 * 64];
        engine.process_interleaved(&mut data, 3, &sine(1_000.0));

        for frame in data.chunks_exact(3) {
            assert_eq!(frame[0], frame[1]);
            assert_eq!(frame[1], frame[2]);
        }
        assert_eq!(engine.frame_counter(), 64);
    }

    #[test]
    fn interleaved_partial_frame_is_zeroed() {
        let mut engine = KeepAliveEngine::with_seed(SAMPLE_RATE, 1).unwrap();
        let mut data = vec![9.0f32; 5];
        let params = EngineParameters {
            signal_type: SignalType::WhiteNoise,
            ..EngineParameters::default()
        };
        engine.process_interleaved(&mut data, 2, &params);

        assert_eq!(data[4], 0.0);
        assert_eq!(engine.frame_counter(), 2);
    }

    #[test]
    fn block_size_does_not_change_output() {
        let params = EngineParameters {
            signal_type: SignalType::PinkNoise,
            periodic_enabled: true,
            play_duration_s: 0.01,
            wait_duration_s: 0.01,
            ..EngineParameters::default()
        };

        let mut whole = KeepAliveEngine::with_seed(SAMPLE_RATE, 5).unwrap();
        let mut expected = vec![0.0f32; 2_048];
        whole.process_interleaved(&mut expected, 1, &params);

        let mut split = KeepAliveEngine::with_seed(SAMPLE_RATE, 5).unwrap();
        let mut actual = vec![0.0f32; 2_048];
        for block in actual.chunks_mut(100) {
            split.process_interleaved(block, 1, &params);
        }

        assert_eq!(expected, actual);
    }

    #[test]
    fn frequency_change_keeps_phase() {
        let mut engine = KeepAliveEngine::with_seed(SAMPLE_RATE, 1).unwrap();
        let mut block = vec![0.0f32; 100];
        engine.process_interleaved(&mut block, 1, &sine(440.0));
        let phase = engine.state().phase();

        engine.process_interleaved(&mut block, 1, &sine(880.0));

        // first sample of the new block continues from the old phase
        assert!((block[0] - phase.sin()).abs() < 1e-6);
    }

    #[test]
    fn switching_type_resets_its_state() {
        let mut engine = KeepAliveEngine::with_seed(SAMPLE_RATE, 1).unwrap();
        let mut block = vec![0.0f32; 100];
        engine.process_interleaved(&mut block, 1, &sine(440.0));
        assert!(engine.state().phase() > 0.0);

        let noise = EngineParameters {
            signal_type: SignalType::WhiteNoise,
            ..sine(440.0)
        };
        engine.process_interleaved(&mut block, 1, &noise);
        engine.process_interleaved(&mut block, 1, &sine(440.0));

        assert_eq!(block[0], 0.0, "sine restarts from phase 0");
    }

    #[test]
    fn wait_window_does_not_advance_generator() {
        let params = EngineParameters {
            periodic_enabled: true,
            play_duration_s: 0.1,
            wait_duration_s: 0.1,
            ..sine(440.0)
        };
        let mut engine = KeepAliveEngine::with_seed(SAMPLE_RATE, 1).unwrap();

        let mut play = vec![0.0f32; 4_800];
        engine.process_interleaved(&mut play, 1, &params);
        let phase_after_play = engine.state().phase();

        let mut wait = vec![1.0f32; 4_800];
        engine.process_interleaved(&mut wait, 1, &params);

        assert!(wait.iter().all(|&s| s == 0.0));
        assert_eq!(engine.state().phase(), phase_after_play);
    }

    #[test]
    fn frequency_above_sample_rate_still_sounds() {
        // 24500 Hz at 22050 Hz aliases to 2450 Hz, nine frames per period
        let mut engine = KeepAliveEngine::with_seed(22_050.0, 1).unwrap();
        assert_eq!(engine.sample_rate(), 22_050.0);

        let mut block = vec![0.0f32; 4_096];
        engine.process_interleaved(&mut block, 1, &sine(24_500.0));

        let peak = block.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(peak > 0.95, "peak {peak} should stay near full scale");
        assert!(engine.state().phase() <= std::f32::consts::TAU);

        let mut folded = KeepAliveEngine::with_seed(22_050.0, 1).unwrap();
        let mut expected = vec![0.0f32; 4_096];
        folded.process_interleaved(&mut expected, 1, &sine(2_450.0));
        for (a, b) in block.iter().zip(&expected) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn non_finite_frequency_does_not_poison_phase() {
        let mut engine = KeepAliveEngine::with_seed(SAMPLE_RATE, 1).unwrap();
        let mut block = vec![0.0f32; 128];
        engine.process_interleaved(&mut block, 1, &sine(440.0));

        for bad in [f32::NAN, f32::INFINITY] {
            engine.process_interleaved(&mut block, 1, &sine(bad));
            assert!(block.iter().all(|s| s.is_finite()));
        }

        engine.process_interleaved(&mut block, 1, &sine(440.0));
        assert!(engine.state().phase().is_finite());
        assert!(block.iter().any(|s| s.abs() > 0.5));
    }
}
