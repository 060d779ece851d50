//! Classification of chat-completion API failures.
//!
//! The HTTP client classifies a failure once, at the network boundary;
//! everything downstream matches on [`ApiErrorKind`] instead of inspecting
//! response shapes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of API failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// 401/403: missing or invalid API key
    Unauthorized,
    /// 402: account out of credits
    PaymentRequired,
    /// 429
    RateLimited,
    /// Other 4xx
    BadRequest,
    /// 5xx
    ServerError,
    /// No HTTP response at all (DNS, TLS, connection reset, timeout)
    Network,
    Unknown,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            402 => ApiErrorKind::PaymentRequired,
            429 => ApiErrorKind::RateLimited,
            400..=499 => ApiErrorKind::BadRequest,
            500..=599 => ApiErrorKind::ServerError,
            _ => ApiErrorKind::Unknown,
        }
    }

    /// Whether the HTTP client may try again later with the same request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiErrorKind::RateLimited | ApiErrorKind::ServerError | ApiErrorKind::Network
        )
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ApiErrorKind::Unauthorized => "The API key was rejected. Check the key in settings.",
            ApiErrorKind::PaymentRequired => "The API account has run out of credits.",
            ApiErrorKind::RateLimited => "Too many requests. Wait a moment and try again.",
            ApiErrorKind::BadRequest => "The request was rejected by the API.",
            ApiErrorKind::ServerError => "The API is having trouble. Try again later.",
            ApiErrorKind::Network => "Could not reach the API. Check your connection.",
            ApiErrorKind::Unknown => "The request failed for an unknown reason.",
        }
    }
}

/// A classified API failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    /// Provider message when the body carried one
    pub message: Option<String>,
}

impl ApiError {
    /// Classify a non-success HTTP response.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::from_status(status),
            status: Some(status),
            message: provider_message(body),
        }
    }

    /// A failure with no HTTP response.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.user_message())?;
        if let Some(message) = &self.message {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

fn provider_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
