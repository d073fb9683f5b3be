//! Benchmarks for the periodic gate.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sound_keeper::dsp::GateTiming;

use crate::BLOCK_SIZES;

pub fn bench_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/gate");
    let continuous = GateTiming::new(false, 0.5, 540.0, 48_000.0);
    // short cycle so every block crosses ramps
    let periodic = GateTiming::new(true, 0.005, 0.005, 48_000.0);

    for &size in BLOCK_SIZES {
        let mut envelope = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("continuous", size), &size, |b, _| {
            b.iter(|| {
                for (i, e) in envelope.iter_mut().enumerate() {
                    *e = continuous.gate(black_box(i as u64)).envelope;
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("periodic", size), &size, |b, _| {
            b.iter(|| {
                for (i, e) in envelope.iter_mut().enumerate() {
                    *e = periodic.gate(black_box(i as u64)).envelope;
                }
            })
        });
    }

    group.finish();
}
