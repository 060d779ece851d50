//! Path resolution for the config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, read_config, GlanceConfig};
use crate::constants::env_vars;
use crate::errors::CliError;

/// Resolve the config file path, checking GLANCE_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Some(path) = config_override() {
        return Ok(path);
    }
    default_config_path()
}

fn config_override() -> Option<PathBuf> {
    std::env::var(env_vars::CONFIG)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Read the config file if one exists.
///
/// A missing default config means "use defaults". A missing file named by
/// GLANCE_CONFIG is an error.
pub fn load_config() -> anyhow::Result<Option<GlanceConfig>> {
    let explicit = config_override().is_some();
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        if explicit {
            return Err(CliError::not_found(
                missing_config_message(&config_path),
                "Hint: Unset GLANCE_CONFIG or run `glance init`.",
            )
            .into());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(None);
    }
    read_config(&config_path).map(Some)
}

/// Resolve the secret store path from `--store`, the config, or the default.
pub fn resolve_store_path(cli: &Cli, configured: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_deref() {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }
    default_store_path()
}

/// Error message when the configured config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!("No config found at {}", config_path.display())
}
