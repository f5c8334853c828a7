//! Error types for the classifier crate.

use thiserror::Error;

/// Errors that can occur during classification.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Configuration error (missing API key, bad endpoint).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP request could not be sent.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-success status.
    #[error("provider error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// The response stream terminated abnormally or was malformed.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Result type for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;
