//! Application context for the Glance CLI.
//!
//! Bundles CLI arguments with lazily-loaded configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use glance_core::storage::FileStore;
use glance_core::SecretVault;

use crate::cli::Cli;
use crate::ui::UiContext;

use super::passphrase::{unlock_with_retry, Unlocked};
use super::resolver::resolve_store_path;
use super::security_config::{load_security_config, SecurityConfig};

/// Application context that bundles CLI args with security configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    security_config: OnceCell<SecurityConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            security_config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the security configuration, loading it lazily if needed.
    pub fn security_config(&self) -> anyhow::Result<&SecurityConfig> {
        self.security_config.get_or_try_init(load_security_config)
    }

    /// Configured chat model.
    pub fn model(&self) -> anyhow::Result<&str> {
        Ok(self.security_config()?.model.as_str())
    }

    /// Path of the secret store in effect.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        let configured = self.security_config()?.store_path.as_deref();
        resolve_store_path(self.cli, configured)
    }

    /// Open the vault over the file store.
    pub fn open_vault(&self) -> anyhow::Result<SecretVault<FileStore>> {
        let path = self.store_path()?;
        tracing::debug!(path = %path.display(), "opening secret store");
        Ok(SecretVault::new(FileStore::new(path)))
    }

    /// Decrypt the stored key.
    pub fn unlock(&self, vault: &SecretVault<FileStore>) -> anyhow::Result<Unlocked> {
        unlock_with_retry(vault, self.security_config()?)
    }

    /// Build a UI context for this command.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color)
    }
}
