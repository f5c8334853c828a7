//! Error types for the monitor crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the monitor engine.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The engine is already running; at most one poll worker may exist.
    #[error("monitor already running")]
    AlreadyRunning,

    /// The tail window configuration is invalid.
    #[error("invalid tail window: min_chars {min} must be > 0 and <= max_chars {max}")]
    InvalidTailWindow {
        /// Configured minimum characters.
        min: usize,
        /// Configured maximum characters.
        max: usize,
    },

    /// The watched file could not be created at any candidate path.
    #[error("failed to create log file at any of {attempted:?}: {message}")]
    FileCreation {
        /// Paths that were tried, in fallback order.
        attempted: Vec<PathBuf>,
        /// Last underlying error message.
        message: String,
    },

    /// Classification failed.
    #[error("classification error: {0}")]
    Classification(#[from] deepeye_classifier::ClassifierError),

    /// Filesystem error on the watched file.
    #[error("file access error: {0}")]
    FileAccess(#[from] std::io::Error),

    /// Shutdown error.
    #[error("shutdown error: {0}")]
    Shutdown(String),
}

/// Result type for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
