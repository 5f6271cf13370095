//! Logging setup
//!
//! The console owns stdout while it runs, so log output only ever goes to a
//! file. Without a configured file no subscriber is installed and the
//! `tracing` macros cost next to nothing.

use std::path::Path;
use std::str::FromStr;

use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::cli::config::LoggingConfig;
use crate::error::{ConsoleError, Result};

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when logging is disabled or a subscriber was already
/// installed.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let Some(file) = &config.file else {
        return Ok(false);
    };

    let level = parse_level(&config.level)?;
    let appender = try_create_appender(file)?;

    let installed = tracing_subscriber::fmt()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .is_ok();
    Ok(installed)
}

pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim())
        .map_err(|_| ConsoleError::Logging(format!("unknown log level '{}'", level)))
}

fn try_create_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path.file_name().ok_or_else(|| {
        ConsoleError::Logging(format!("log path {} has no file name", path.display()))
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| ConsoleError::io(parent, e))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(parent)
        .map_err(|e| ConsoleError::Logging(format!("cannot open {}: {}", path.display(), e)))
}
