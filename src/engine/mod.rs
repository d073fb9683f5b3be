//! Block processing and control-to-audio parameter delivery.
//!
//! [`KeepAliveEngine`] is the frame processor: it gates, synthesizes and
//! broadcasts one block at a time. [`StreamRenderer`] wraps it for the audio
//! callback, draining a lock-free parameter queue fed by a [`ParamHandle`] on
//! the control thread.

pub mod message;
pub mod params;
pub mod processor;
pub mod renderer;

pub use message::{MessageReceiver, ParamMessage};
pub use params::EngineParameters;
pub use processor::KeepAliveEngine;
#[cfg(feature = "rtrb")]
pub use renderer::ParamHandle;
pub use renderer::StreamRenderer;
