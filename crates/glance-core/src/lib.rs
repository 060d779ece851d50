//! # Glance Core
//!
//! Core library for Glance - explain or fact-check selected text with an LLM,
//! keeping the API key encrypted at rest.
//!
//! This crate holds the logic that has real correctness properties,
//! independent of any UI or HTTP client.
//!
//! ## Architecture
//!
//! - **crypto**: passphrase key derivation and authenticated secret encryption
//! - **storage**: key/value store adapters and the `SecretVault`
//! - **response**: JSON recovery from raw LLM output and typed result schemas
//! - **api**: chat-completion request payloads and failure classification

pub mod api;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod response;
pub mod storage;

pub use error::{GlanceError, Result};
pub use response::{parse, NormalizedResponse, StructuredResponse};
pub use storage::{SecretStore, SecretVault};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
