//! Application-level utilities for the Glance CLI.
//!
//! This module provides:
//! - Path resolution for config and store files
//! - Security configuration loading
//! - Unlocking the stored key with retry logic

mod context;
mod passphrase;
mod resolver;
mod security_config;

// Re-export public API
pub use context::AppContext;
pub use passphrase::passphrase_for_new_secret;
pub use resolver::resolve_config_path;
pub use security_config::device_keyfile_warning;
