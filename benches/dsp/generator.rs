//! Benchmarks for per-type sample generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sound_keeper::dsp::{GeneratorState, SignalType};

use crate::BLOCK_SIZES;

pub fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/generator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for signal in SignalType::ALL {
            let mut state = GeneratorState::with_seed(48_000.0, 1);
            let mut frame = 0u64;
            let name = format!("{signal:?}").to_lowercase();

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = state.next_sample(black_box(signal), black_box(440.0), frame);
                        frame += 1;
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
