//! CLI error type.

use std::path::PathBuf;

use engage_lib::error::PageError;
use thiserror::Error;

/// Errors that stop a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    UrlSync(#[from] engage_lib::error::UrlSyncError),

    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl CliError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a JSON error for `path`.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
