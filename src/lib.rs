pub mod dsp; // Signal generator, noise filters, burst gate
pub mod engine; // Block processing and parameter delivery
pub mod error; // Construction-time configuration errors

#[cfg(feature = "serde")]
pub mod config; // Persisted host settings and presets

pub use dsp::SignalType;
pub use engine::{EngineParameters, KeepAliveEngine, StreamRenderer};
pub use error::ConfigurationError;
