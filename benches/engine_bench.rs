//! Benchmarks for the keep-alive engine.
//!
//! Run with: cargo bench
//!
//! The render path must finish well inside one audio callback.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Generator and gate primitives
//!   - scenarios/*  Full stream renders as the audio callback sees them

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_generator,
    dsp::bench_gate,
    scenarios::bench_stream,
);
criterion_main!(benches);
