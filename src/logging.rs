//! File-backed tracing setup. The terminal belongs to ratatui, so events go to
//! `<cache dir>/app.log` and nowhere else.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::cache_dir;

const LOG_FILE: &str = "app.log";
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Returns `Ok(false)` when no cache
/// directory is available and logging stays disabled.
pub fn init_logging() -> Result<bool> {
    let Some(dir) = cache_dir() else {
        return Ok(false);
    };
    fs::create_dir_all(&dir).context("create log dir")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
        .context("open log file")?;

    let env_filter =
        EnvFilter::try_from_env("AFL_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .compact(),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(true)
}
