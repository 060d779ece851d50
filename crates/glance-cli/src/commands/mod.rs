//! Command handlers, one module per top-level subcommand.

pub mod init;
pub mod key;
pub mod misc;
pub mod parse;
pub mod prompt;
