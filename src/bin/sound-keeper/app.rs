//! Keeper - owns the output stream and its lifecycle

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, StreamTrait};

use sound_keeper::{
    config::AudioConfig,
    engine::{KeepAliveEngine, ParamHandle, StreamRenderer},
};

use super::device;

/// A running stream plus the handle that tunes it.
struct ActiveStream {
    /// Dropping the stream stops playback
    _stream: cpal::Stream,
    handle: ParamHandle,
    config: AudioConfig,
}

/// Starts, stops and reconfigures the keep-alive stream.
///
/// Numeric changes are pushed live to the audio thread. Changing the signal
/// type or the device tears the stream down and builds a new one.
pub struct Keeper {
    active: Option<ActiveStream>,
}

impl Keeper {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Open the configured device and start playing. No-op if already running.
    pub fn start(&mut self, config: &AudioConfig) -> EyreResult<()> {
        if self.active.is_some() {
            return Ok(());
        }

        config.validate().wrap_err("invalid configuration")?;

        let device = device::output_device(config.device_name())?;
        let supported = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels() as usize;
        if supported.sample_format() != cpal::SampleFormat::F32 {
            log::warn!(
                "Device prefers {:?} samples, requesting f32 anyway",
                supported.sample_format()
            );
        }

        let engine = KeepAliveEngine::new(sample_rate)?;
        let (mut renderer, handle) =
            StreamRenderer::new(engine, config.engine_parameters(), config.gain())?;

        let stream = device
            .build_output_stream(
                &supported.into(),
                move |data: &mut [f32], _| {
                    renderer.render_interleaved(data, channels);
                },
                |err| log::error!("Audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        log::info!(
            "Started {} on {} ({} Hz, {} ch, gain {:.2})",
            config.stream_type.label(),
            device.name().unwrap_or_else(|_| "unknown device".to_string()),
            sample_rate,
            channels,
            config.gain(),
        );

        self.active = Some(ActiveStream {
            _stream: stream,
            handle,
            config: config.clone(),
        });
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.active.take().is_some() {
            log::info!("Stopped");
        }
    }

    /// Apply a new configuration to the running stream. Ignored when stopped.
    pub fn update(&mut self, config: &AudioConfig) -> EyreResult<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };

        if active.config.requires_restart(config) {
            log::info!("Signal type or device changed, restarting stream");
            self.stop();
            return self.start(config);
        }

        config.validate().wrap_err("invalid configuration")?;

        let params_sent = active.handle.set_parameters(config.engine_parameters())?;
        let gain_sent = active.handle.set_gain(config.gain())?;
        if !(params_sent && gain_sent) {
            log::warn!("Parameter queue full, some changes were dropped");
        }

        log::info!(
            "Updated: {:.0} Hz, periodic {}, play {} s, wait {} min, gain {:.2}",
            config.frequency,
            config.is_periodic,
            config.play_duration,
            config.wait_duration,
            config.gain(),
        );
        active.config = config.clone();
        Ok(())
    }
}

impl Default for Keeper {
    fn default() -> Self {
        Self::new()
    }
}
