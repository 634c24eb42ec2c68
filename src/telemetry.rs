//! Logging setup.
//!
//! The terminal is in raw mode on the alternate screen while the game runs, so
//! log lines never go to stdout or stderr. They are appended to a file, and
//! only when one is configured.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use crate::config::Config;

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when logging is disabled.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };
    install(path, config.log_level)?;
    Ok(true)
}

fn install(path: &Path, level: Level) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_path() {
        let config = Config {
            log_path: None,
            log_level: Level::TRACE,
            seed: 1,
        };
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let config = Config {
            log_path: Some("/nonexistent-dir/for/sure/tetris.log".into()),
            log_level: Level::INFO,
            seed: 1,
        };
        assert!(init(&config).is_err());
    }
}
