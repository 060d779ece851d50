//! CLI error types for structured error handling.
//!
//! Core errors are mapped here to the messages a user should see and to
//! stable exit codes.

use std::fmt;

use glance_core::GlanceError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Resource not found (config, stored key, keyfile)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Stored blob cannot be decoded
    Corrupted { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Anything else that stops the command
    Failed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } | CliError::Corrupted { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) | CliError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::Corrupted { .. } => exit_codes::CORRUPTED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Failed(_) => exit_codes::FAILURE,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

impl From<&GlanceError> for CliError {
    fn from(err: &GlanceError) -> Self {
        match err {
            GlanceError::Encryption(detail) => {
                tracing::error!("encryption failed: {}", detail);
                CliError::Failed("Could not secure your API key.".to_string())
            }
            GlanceError::MalformedBlob(_) => CliError::Corrupted {
                message: "Stored API key is corrupted.".to_string(),
                hint: "Hint: Re-enter it with `glance key set`.".to_string(),
            },
            GlanceError::Authentication => CliError::auth_failed_with_hint(
                "Incorrect passphrase or corrupted data.",
                "Hint: Check your passphrase or set GLANCE_PASSPHRASE.",
            ),
            GlanceError::NotFound(message) => CliError::not_found(
                capitalize(message),
                "Hint: Store one with `glance key set`.",
            ),
            GlanceError::InvalidInput(message) | GlanceError::Validation(message) => {
                CliError::InvalidInput(message.clone())
            }
            GlanceError::Storage(message) => CliError::Failed(message.clone()),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
