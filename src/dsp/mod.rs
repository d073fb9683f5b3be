//! Low-level DSP primitives used by the keep-alive engine.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! call directly from the audio callback. They stay focused on the
//! signal-processing math; block handling and parameter delivery live in
//! [`crate::engine`].

/// Periodic burst gate with linear attack/decay ramps.
pub mod gate;
/// Keep-alive signal types and per-stream synthesis state.
pub mod generator;
/// White source and pink/brown colouring filters.
pub mod noise;

pub use gate::{GateDecision, GateTiming};
pub use generator::{GeneratorState, SignalType};
