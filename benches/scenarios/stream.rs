//! Stereo interleaved renders, the shape cpal hands the callback.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sound_keeper::{EngineParameters, KeepAliveEngine, SignalType, StreamRenderer};

use crate::BLOCK_SIZES;

pub fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/stream");

    let pulse = EngineParameters {
        signal_type: SignalType::Sine,
        frequency_hz: 24_500.0,
        periodic_enabled: true,
        play_duration_s: 0.5,
        wait_duration_s: 0.5,
    };
    let pink = EngineParameters {
        signal_type: SignalType::PinkNoise,
        ..EngineParameters::default()
    };

    for &size in BLOCK_SIZES {
        let mut data = vec![0.0f32; size * 2];

        for (name, params) in [("sine_pulse", pulse), ("pink_continuous", pink)] {
            let engine = KeepAliveEngine::with_seed(48_000.0, 1).unwrap();
            let mut renderer = StreamRenderer::with_receiver(engine, params, 0.5, ()).unwrap();

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    renderer.render_interleaved(black_box(&mut data), 2);
                })
            });
        }
    }

    group.finish();
}
