/*
Periodic Gate and Burst Envelope
================================

In periodic mode the engine does not play continuously. It plays a short burst,
waits, then plays again. A device that only needs a "poke" every few minutes
gets one, and the listener is spared a constant tone.

Vocabulary
----------

  cycle         One burst plus one wait. Measured in frames.

  play window   The first `play_frames` frames of every cycle. The generator
                runs here.

  wait window   The rest of the cycle. Output is silent and the generator is
                NOT advanced.

  envelope      Gain multiplier (0.0 to 1.0) applied inside the play window.

  ramp          Linear slope at the start (attack) and end (decay) of a burst.


The Shape
---------

  Envelope
    1.0 ┤  ╱‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾╲
        │ ╱                  ╲
    0.0 ┼╱────────────────────╲─────────────────────────╱‾‾
        │◄─────── play ───────►◄────────── wait ────────►
        0                play_frames               cycle_frames
         ◄─► attack = 2 ms  ◄─► decay = 2 ms

Switching a signal on or off in one sample is a step discontinuity, and a step
contains energy at every frequency: it clicks. A 2 ms linear ramp is too short
to change how long the burst feels but long enough to remove the click.


The Math
--------

Everything is done in whole frames, derived once per block:

    cycle_frames  = round((play_s + wait_s) · sample_rate)
    play_frames   = round(play_s · sample_rate)
    attack_frames = decay_frames = round(0.002 · sample_rate)

Per frame:

    frame_in_cycle = absolute_frame mod cycle_frames

    frame_in_cycle >= play_frames                 → silent
    frame_in_cycle <  attack_frames               → fic / attack
    frame_in_cycle >  play_frames - decay_frames  → (play - fic) / decay
    otherwise                                     → 1.0

Example at 48 kHz with a 1 s burst: attack_frames = 96, so frame 0 is 0.0,
frame 48 is 0.5, frame 95 is ~0.99 and frame 96 reaches 1.0.

The envelope can be 0.0 while the frame still counts as audible (the very first
frame of every burst). The generator runs anyway so phase and filter state move
forward and the next burst picks up continuously.

A zero-length cycle (periodic mode with no play and no wait time) has no
meaningful gating, so it degrades to "always play" instead of dividing by zero.
*/

/// Fixed attack/decay ramp length in seconds.
pub const RAMP_SECONDS: f64 = 0.002;

/// Result of gating one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateDecision {
    /// Whether the generator should run this frame.
    pub audible: bool,
    /// Multiplier in [0, 1] applied to the generator output.
    pub envelope: f32,
}

impl GateDecision {
    pub const OPEN: Self = Self {
        audible: true,
        envelope: 1.0,
    };

    pub const CLOSED: Self = Self {
        audible: false,
        envelope: 0.0,
    };
}

/// Frame-domain timing of the periodic gate for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTiming {
    /// Every frame plays at full level.
    Continuous,
    Periodic {
        cycle_frames: u64,
        play_frames: u64,
        attack_frames: u64,
        decay_frames: u64,
    },
}

impl GateTiming {
    pub fn new(
        periodic_enabled: bool,
        play_duration_s: f32,
        wait_duration_s: f32,
        sample_rate: f32,
    ) -> Self {
        if !periodic_enabled {
            return GateTiming::Continuous;
        }

        let sample_rate = sample_rate as f64;
        let play = play_duration_s as f64;
        let wait = wait_duration_s as f64;

        let cycle_frames = seconds_to_frames(play + wait, sample_rate);
        if cycle_frames == 0 {
            return GateTiming::Continuous;
        }

        let ramp_frames = seconds_to_frames(RAMP_SECONDS, sample_rate);

        GateTiming::Periodic {
            cycle_frames,
            play_frames: seconds_to_frames(play, sample_rate),
            attack_frames: ramp_frames,
            decay_frames: ramp_frames,
        }
    }

    /// Gate decision for one absolute frame.
    #[inline]
    pub fn gate(&self, absolute_frame: u64) -> GateDecision {
        let (cycle_frames, play_frames, attack_frames, decay_frames) = match *self {
            GateTiming::Continuous => return GateDecision::OPEN,
            GateTiming::Periodic {
                cycle_frames,
                play_frames,
                attack_frames,
                decay_frames,
            } => (cycle_frames, play_frames, attack_frames, decay_frames),
        };

        let frame_in_cycle = absolute_frame % cycle_frames;
        if frame_in_cycle >= play_frames {
            return GateDecision::CLOSED;
        }

        let envelope = if attack_frames > 0 && frame_in_cycle < attack_frames {
            frame_in_cycle as f32 / attack_frames as f32
        } else if decay_frames > 0 && frame_in_cycle + decay_frames > play_frames {
            (play_frames - frame_in_cycle) as f32 / decay_frames as f32
        } else {
            1.0
        };

        GateDecision {
            audible: true,
            envelope: envelope.clamp(0.0, 1.0),
        }
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self, GateTiming::Periodic { .. })
    }
}

/// One-shot gate query.
///
/// Convenience over [`GateTiming`] for callers that gate a single frame; the
/// engine builds the timing once per block instead.
pub fn gate(
    periodic_enabled: bool,
    play_duration_s: f32,
    wait_duration_s: f32,
    absolute_frame: u64,
    sample_rate: f32,
) -> GateDecision {
    GateTiming::new(periodic_enabled, play_duration_s, wait_duration_s, sample_rate)
        .gate(absolute_frame)
}

fn seconds_to_frames(seconds: f64, sample_rate: f64) -> u64 {
    let frames = (seconds * sample_rate).round();
    // NaN and negatives saturate to 0
    frames.max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn non_periodic_is_always_open() {
        for frame in [0, 1, 95, 24_000, u64::MAX] {
            assert_eq!(gate(false, 0.5, 540.0, frame, SAMPLE_RATE), GateDecision::OPEN);
        }
    }

    #[test]
    fn zero_wait_repeats_play_window() {
        let timing = GateTiming::new(true, 0.5, 0.0, SAMPLE_RATE);
        assert!(timing.is_periodic());

        for frame in 0..24_000 {
            assert!(timing.gate(frame).audible, "frame {frame} should play");
        }

        // cycle_frames == play_frames, so frame 24000 starts the next burst
        let restart = timing.gate(24_000);
        assert!(restart.audible);
        assert_eq!(restart.envelope, 0.0);
    }

    #[test]
    fn wait_window_is_silent() {
        // 0.5 s play, 9 min wait
        let timing = GateTiming::new(true, 0.5, 540.0, SAMPLE_RATE);
        assert_eq!(timing.gate(24_000), GateDecision::CLOSED);
        assert_eq!(timing.gate(1_000_000), GateDecision::CLOSED);

        let cycle = (540.5 * SAMPLE_RATE as f64) as u64;
        assert!(timing.gate(cycle + 100).audible);
    }

    #[test]
    fn envelope_ramps_match_frame_positions() {
        let timing = GateTiming::new(true, 1.0, 1.0, SAMPLE_RATE);

        assert_eq!(timing.gate(0).envelope, 0.0);
        assert_eq!(timing.gate(48).envelope, 0.5);
        assert!((timing.gate(95).envelope - 0.99).abs() < 0.01);
        assert_eq!(timing.gate(96).envelope, 1.0);
        assert_eq!(timing.gate(20_000).envelope, 1.0);

        // decay: play_frames = 48000, decay_frames = 96
        assert_eq!(timing.gate(48_000 - 96).envelope, 1.0);
        assert_eq!(timing.gate(48_000 - 48).envelope, 0.5);
        assert!((timing.gate(47_999).envelope - 1.0 / 96.0).abs() < 1e-6);
    }

    #[test]
    fn envelope_is_always_in_unit_range() {
        // burst shorter than attack + decay
        let timing = GateTiming::new(true, 0.001, 0.001, SAMPLE_RATE);
        for frame in 0..1_000 {
            let decision = timing.gate(frame);
            assert!((0.0..=1.0).contains(&decision.envelope));
        }
    }

    #[test]
    fn zero_cycle_degrades_to_continuous() {
        assert_eq!(GateTiming::new(true, 0.0, 0.0, SAMPLE_RATE), GateTiming::Continuous);
        assert_eq!(gate(true, 0.0, 0.0, 12_345, SAMPLE_RATE), GateDecision::OPEN);
    }

    #[test]
    fn tiny_sample_rate_skips_ramps() {
        // round(0.002 * 100) == 0
        let timing = GateTiming::new(true, 1.0, 1.0, 100.0);
        assert_eq!(timing.gate(0), GateDecision::OPEN);
        assert_eq!(timing.gate(100), GateDecision::CLOSED);
    }
}
