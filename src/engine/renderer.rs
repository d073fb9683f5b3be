#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    engine::{
        message::{validate_gain, MessageReceiver, ParamMessage},
        EngineParameters, KeepAliveEngine,
    },
    error::ConfigurationError,
};

/// Audio-thread side of a keep-alive stream.
///
/// Drains pending parameter changes at the start of every block, renders the
/// block with one consistent snapshot, then applies the output gain.
pub struct StreamRenderer<R: MessageReceiver> {
    engine: KeepAliveEngine,
    rx: R,
    params: EngineParameters,
    gain: f32,
}

impl<R: MessageReceiver> StreamRenderer<R> {
    /// Fails if the initial parameters or gain are out of range.
    pub fn with_receiver(
        engine: KeepAliveEngine,
        params: EngineParameters,
        gain: f32,
        rx: R,
    ) -> Result<Self, ConfigurationError> {
        params.validate()?;
        validate_gain(gain)?;

        Ok(Self {
            engine,
            rx,
            params,
            gain,
        })
    }

    /// Render an interleaved cpal-style buffer. Always returns `true`.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) -> bool {
        self.drain_messages();
        let keep_running = self.engine.process_interleaved(data, channels, &self.params);
        apply_gain(data, self.gain);
        keep_running
    }

    /// Render one slice per channel. Always returns `true`.
    pub fn render_planar(&mut self, output: &mut [&mut [f32]]) -> bool {
        self.drain_messages();
        let keep_running = self.engine.process(output, &self.params);
        for channel in output.iter_mut() {
            apply_gain(channel, self.gain);
        }
        keep_running
    }

    pub fn params(&self) -> &EngineParameters {
        &self.params
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn engine(&self) -> &KeepAliveEngine {
        &self.engine
    }

    fn drain_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            msg.apply(&mut self.params, &mut self.gain);
        }
    }
}

#[inline]
fn apply_gain(samples: &mut [f32], gain: f32) {
    if gain == 1.0 {
        return;
    }
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}

#[cfg(feature = "rtrb")]
const PARAM_QUEUE_SIZE: usize = 64;

#[cfg(feature = "rtrb")]
impl StreamRenderer<Consumer<ParamMessage>> {
    /// Renderer plus the control-thread handle that feeds it.
    pub fn new(
        engine: KeepAliveEngine,
        params: EngineParameters,
        gain: f32,
    ) -> Result<(Self, ParamHandle), ConfigurationError> {
        let (tx, rx) = RingBuffer::<ParamMessage>::new(PARAM_QUEUE_SIZE);

        let renderer = Self::with_receiver(engine, params, gain, rx)?;
        let handle = ParamHandle { tx };

        Ok((renderer, handle))
    }
}

/// Control-thread side of the parameter channel.
///
/// Every setter is wait-free. Out-of-range values are rejected with a
/// [`ConfigurationError`] and never reach the audio thread. `Ok(false)` means
/// the queue was full and the change was dropped, which only happens when the
/// audio thread has stalled.
#[cfg(feature = "rtrb")]
pub struct ParamHandle {
    tx: Producer<ParamMessage>,
}

#[cfg(feature = "rtrb")]
impl ParamHandle {
    pub fn send(&mut self, msg: ParamMessage) -> Result<bool, ConfigurationError> {
        msg.validate()?;
        Ok(self.tx.push(msg).is_ok())
    }

    pub fn set_signal_type(
        &mut self,
        signal: crate::dsp::SignalType,
    ) -> Result<bool, ConfigurationError> {
        self.send(ParamMessage::SignalType(signal))
    }

    pub fn set_frequency(&mut self, hz: f32) -> Result<bool, ConfigurationError> {
        self.send(ParamMessage::Frequency(hz))
    }

    pub fn set_periodic(&mut self, enabled: bool) -> Result<bool, ConfigurationError> {
        self.send(ParamMessage::Periodic(enabled))
    }

    pub fn set_play_duration(&mut self, seconds: f32) -> Result<bool, ConfigurationError> {
        self.send(ParamMessage::PlayDuration(seconds))
    }

    pub fn set_wait_duration(&mut self, seconds: f32) -> Result<bool, ConfigurationError> {
        self.send(ParamMessage::WaitDuration(seconds))
    }

    pub fn set_gain(&mut self, gain: f32) -> Result<bool, ConfigurationError> {
        self.send(ParamMessage::Gain(gain))
    }

    pub fn set_parameters(&mut self, params: EngineParameters) -> Result<bool, ConfigurationError> {
        self.send(ParamMessage::Parameters(params))
    }

    /// Free slots left in the queue.
    pub fn capacity_left(&self) -> usize {
        self.tx.slots()
    }
}
