//! Logging init for detection runs.
//!
//! Detection outcomes are emitted under the `binver::detect` target (see
//! [`crate::sink::TracingSink`]); the default filter keeps those at `info` so a
//! match or an unknown-version warning always reaches the log, while the rest
//! of the crate stays at `warn`. `BINVER_LOG` overrides the filter.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::sink::DETECT_TARGET;

/// Environment variable holding an `EnvFilter` directive string.
pub const FILTER_ENV: &str = "BINVER_LOG";

const LOG_FILE_NAME: &str = "binver.log";

/// `warn` everywhere, `info` for detection outcomes, `debug` for artifact writes.
pub fn default_filter() -> String {
    format!("warn,{DETECT_TARGET}=info,binver_core::artifact=debug")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter()))
}

/// `<state_home>/binver/binver.log`.
pub fn log_file_in(state_home: &Path) -> PathBuf {
    state_home.join("binver").join(LOG_FILE_NAME)
}

/// Append detection logs to `binver.log` under the XDG state dir.
/// Returns the log path. On failure the caller falls back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("binver")?;
    let path = log_file_in(&xdg_dirs.get_state_home());
    init_logging_to(&path)?;
    Ok(path)
}

/// Append detection logs to `path`, creating parent directories.
pub fn init_logging_to(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::debug!(target: DETECT_TARGET, "logging to {}", path.display());
    Ok(())
}

/// Detection logs to stderr only.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .try_init();
}
