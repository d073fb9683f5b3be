//! Config file watcher
//!
//! Re-reads the config file after edits settle and hands the new value to the
//! caller on the current thread, so non-`Send` audio streams can be touched.

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use sound_keeper::config::AudioConfig;

/// Wait this long after the last change before reloading
const DEBOUNCE_MS: u64 = 500;

/// Block forever, calling `on_change` whenever the file at `path` parses to a
/// different config than last seen.
pub fn run(path: &Path, mut on_change: impl FnMut(&AudioConfig)) -> EyreResult<()> {
    let (tx, rx) = channel::<()>();

    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| match result {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    let _ = tx.send(());
                }
            }
            Err(err) => log::warn!("File watcher error: {err}"),
        },
        Config::default(),
    )
    .wrap_err("failed to create file watcher")?;

    // Editors often replace the file instead of writing in place, so watch
    // the directory rather than the file itself.
    let watch_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    watcher
        .watch(watch_dir, RecursiveMode::NonRecursive)
        .wrap_err_with(|| format!("failed to watch {}", watch_dir.display()))?;

    log::info!("Watching {} for changes (Ctrl+C to quit)", path.display());

    let debounce = Duration::from_millis(DEBOUNCE_MS);
    let mut last_event: Option<Instant> = None;
    let mut current = AudioConfig::load(path);

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(()) => last_event = Some(Instant::now()),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::info!("File watcher channel disconnected");
                return Ok(());
            }
        }

        if last_event.is_some_and(|t| t.elapsed() >= debounce) {
            last_event = None;

            let next = AudioConfig::load(path);
            if next != current {
                log::info!("Config changed, applying");
                on_change(&next);
                current = next;
            }
        }
    }
}
