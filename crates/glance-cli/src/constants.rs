//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure (could not secure the key, I/O errors).
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, stored key, keyfile).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// Stored key is structurally corrupted.
    pub const CORRUPTED: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    /// Config file override.
    pub const CONFIG: &str = "GLANCE_CONFIG";

    /// Passphrase for unlocking (and, for `key set`, locking) the stored key.
    pub const PASSPHRASE: &str = "GLANCE_PASSPHRASE";

    /// New passphrase for `key rotate`.
    pub const NEW_PASSPHRASE: &str = "GLANCE_NEW_PASSPHRASE";
}

/// Attempts allowed when prompting for a passphrase interactively.
pub const MAX_PASSPHRASE_ATTEMPTS: usize = 3;
