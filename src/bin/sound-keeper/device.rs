//! Output device enumeration and selection

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait};

pub struct OutputDeviceInfo {
    pub name: String,
    pub is_default: bool,
}

/// List every output device the default host exposes.
pub fn list_output_devices() -> EyreResult<Vec<OutputDeviceInfo>> {
    let host = cpal::default_host();
    let default_name = host.default_output_device().and_then(|d| d.name().ok());

    let devices = host
        .output_devices()
        .wrap_err("failed to enumerate output devices")?;

    let mut result = Vec::new();
    for device in devices {
        match device.name() {
            Ok(name) => result.push(OutputDeviceInfo {
                is_default: Some(&name) == default_name.as_ref(),
                name,
            }),
            Err(err) => log::debug!("Skipping unnamed output device: {err}"),
        }
    }

    Ok(result)
}

/// Output device by name, or the host default when `name` is `None`.
pub fn output_device(name: Option<&str>) -> EyreResult<cpal::Device> {
    let host = cpal::default_host();

    let Some(wanted) = name else {
        return host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"));
    };

    let devices = host
        .output_devices()
        .wrap_err("failed to enumerate output devices")?;

    for device in devices {
        if device.name().is_ok_and(|n| n == wanted) {
            return Ok(device);
        }
    }

    Err(eyre!(
        "output device '{wanted}' is not available or not supported; \
         run with --list-devices and pick another"
    ))
}

pub fn print_output_devices() -> EyreResult<()> {
    let devices = list_output_devices()?;
    if devices.is_empty() {
        println!("No output devices found");
        return Ok(());
    }

    for device in devices {
        let marker = if device.is_default { " (default)" } else { "" };
        println!("  {}{}", device.name, marker);
    }
    Ok(())
}
