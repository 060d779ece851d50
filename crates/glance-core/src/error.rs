//! Error types for Glance core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these to
//! user-facing messages and exit codes.
//!
//! Parsing LLM output never produces an error. A response that cannot be
//! structured is a [`crate::response::NormalizedResponse::Fallback`] value.

use thiserror::Error;

/// Result type alias for Glance operations.
pub type Result<T> = std::result::Result<T, GlanceError>;

/// Core error type for Glance operations.
#[derive(Debug, Error)]
pub enum GlanceError {
    /// Cipher or random source failure while securing a secret
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Stored blob cannot contain salt, nonce and ciphertext
    #[error("Malformed blob: {0}")]
    MalformedBlob(String),

    /// Authentication tag did not verify.
    ///
    /// Covers a wrong passphrase, tampering and corruption alike. The cause
    /// is deliberately not recorded.
    #[error("Incorrect passphrase or corrupted data")]
    Authentication,

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage adapter error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<std::io::Error> for GlanceError {
    fn from(err: std::io::Error) -> Self {
        GlanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for GlanceError {
    fn from(err: serde_json::Error) -> Self {
        GlanceError::Validation(err.to_string())
    }
}
