//! Benchmarks for low-level DSP primitives.

mod gate;
mod generator;

pub use gate::bench_gate;
pub use generator::bench_generator;
