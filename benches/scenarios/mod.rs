//! Benchmarks for end-to-end stream rendering.

mod stream;

pub use stream::bench_stream;
