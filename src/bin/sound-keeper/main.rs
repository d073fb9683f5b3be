//! sound-keeper - keep an audio output device awake
//!
//! Run with: cargo run -- [--config PATH] [--reset] [--preset N] [--device NAME] [--list-devices]

mod app;
mod device;
mod watch;

use std::path::PathBuf;

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};

use app::Keeper;
use sound_keeper::config::{default_config_path, AudioConfig, PRESETS};

const USAGE: &str =
    "usage: sound-keeper [--config PATH] [--reset] [--preset N] [--device NAME] [--list-devices]";

#[derive(Default)]
struct Args {
    config: Option<PathBuf>,
    preset: Option<usize>,
    device: Option<String>,
    list_devices: bool,
    reset: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> EyreResult<Self> {
        let mut parsed = Args::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--device" => parsed.device = Some(value(&mut args, &arg)?),
                "--preset" => {
                    let raw = value(&mut args, &arg)?;
                    let n = raw
                        .parse::<usize>()
                        .wrap_err_with(|| format!("invalid preset number '{raw}'"))?;
                    parsed.preset = Some(n);
                }
                "--list-devices" => parsed.list_devices = true,
                "--reset" => parsed.reset = true,
                "-h" | "--help" => {
                    println!("{USAGE}");
                    print_presets();
                    std::process::exit(0);
                }
                other => bail!("unknown argument '{other}'\n{USAGE}"),
            }
        }

        Ok(parsed)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> EyreResult<String> {
    args.next().ok_or_else(|| eyre!("{flag} needs a value\n{USAGE}"))
}

fn print_presets() {
    println!("presets:");
    for (i, preset) in PRESETS.iter().enumerate() {
        println!("  {}: {}", i + 1, preset.label);
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(std::env::args().skip(1))?;

    if args.list_devices {
        return device::print_output_devices();
    }

    let path = match args.config {
        Some(path) => path,
        None => default_config_path()
            .ok_or_else(|| eyre!("no config directory on this platform, pass --config PATH"))?,
    };

    let mut config = if args.reset {
        log::info!("Resetting {} to defaults", path.display());
        AudioConfig::reset(&path).wrap_err_with(|| format!("failed to reset {}", path.display()))?
    } else {
        AudioConfig::load(&path)
    };
    if let Some(n) = args.preset {
        let preset = n
            .checked_sub(1)
            .and_then(|i| PRESETS.get(i))
            .ok_or_else(|| eyre!("no preset {n}, choose 1..={}", PRESETS.len()))?;
        log::info!("Applying preset: {}", preset.label);
        config = preset.apply(&config);
    }
    if let Some(device) = args.device {
        config.device_id = device;
    }

    config
        .save(&path)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;

    let mut keeper = Keeper::new();
    if let Err(err) = keeper.start(&config) {
        log::error!("Failed to start audio engine: {err:#}");
    }

    watch::run(&path, |next| {
        let result = if keeper.is_active() {
            keeper.update(next)
        } else {
            keeper.start(next)
        };
        if let Err(err) = result {
            log::error!("Failed to apply config: {err:#}");
        }
    })
}
