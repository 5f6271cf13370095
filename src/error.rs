//! Error Types
//!
//! The editing engine itself never fails; these errors come from the
//! surfaces around it: configuration files, history persistence when a
//! caller asks for it explicitly, logging setup and the terminal.

use std::path::PathBuf;

/// Errors raised outside the keystroke path.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file exists but is not valid JSON for [`crate::cli::ConsoleConfig`].
    #[error("invalid configuration in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Terminal setup, rendering or teardown failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl ConsoleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
