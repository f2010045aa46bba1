//! Logging error types.
//!
//! Emitting a log line never fails; these errors only come out of
//! configuration loading and process-wide logger installation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fallible logging setup operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while configuring or installing a logger.
#[derive(Debug, Error)]
pub enum LogError {
    /// Failed to read a configuration file.
    #[error("failed to read logging configuration '{path}': {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("failed to parse logging configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A level name did not match any known level.
    #[error("unknown log level: {0}")]
    InvalidLevel(String),

    /// Configuration validation failed.
    #[error("logging configuration validation failed: {0}")]
    Validation(String),

    /// The process-wide logger was already installed.
    #[error("global logger already initialized")]
    AlreadyInitialized,
}
