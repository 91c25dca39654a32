//! Logging init: file under the XDG state dir, or stderr as a fallback.

use anyhow::Result;
use std::fs;
use std::io;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,hotpush=debug"))
}

/// Initialize structured logging to `~/.local/state/hotpush/hotpush.log`.
/// Returns Err when the log file cannot be opened (e.g. state dir
/// unwritable) so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hotpush")?;
    let log_dir = xdg_dirs.get_state_home().join("hotpush");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("hotpush.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Each log line gets a fresh handle; if the clone fails mid-run the
    // line goes to stderr instead of being lost.
    let writer = BoxMakeWriter::new(move || -> Box<dyn io::Write> {
        match file.try_clone() {
            Ok(f) => Box::new(f),
            Err(_) => Box::new(io::stderr()),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("hotpush logging initialized at {}", log_path.display());

    Ok(())
}

/// Initialize logging to stderr only (no file). Used when [`init_logging`]
/// fails so the CLI still logs somewhere.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
