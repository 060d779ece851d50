//! Security configuration loading and validation.

use std::path::PathBuf;

use glance_core::api::DEFAULT_MODEL;

use crate::config::{default_keyfile_path, SecurityTier};

use super::resolver::load_config;

/// Runtime settings loaded from the config file.
pub struct SecurityConfig {
    pub tier: SecurityTier,
    pub keyfile_path: Option<PathBuf>,
    pub store_path: Option<PathBuf>,
    pub model: String,
}

/// Load settings from the config file, or defaults when there is none.
pub fn load_security_config() -> anyhow::Result<SecurityConfig> {
    if let Some(config) = load_config()? {
        let security = SecurityConfig {
            tier: config.security.tier,
            keyfile_path: config.keyfile.path.as_ref().map(PathBuf::from),
            store_path: Some(PathBuf::from(config.store.path)),
            model: config.api.model,
        };
        validate_security_config(&security)?;
        return Ok(security);
    }

    Ok(SecurityConfig {
        tier: SecurityTier::Passphrase,
        keyfile_path: Some(default_keyfile_path()?),
        store_path: None,
        model: DEFAULT_MODEL.to_string(),
    })
}

/// Validate that the config has the fields its tier needs.
fn validate_security_config(config: &SecurityConfig) -> anyhow::Result<()> {
    if matches!(config.tier, SecurityTier::DeviceKeyfile) && config.keyfile_path.is_none() {
        return Err(anyhow::anyhow!(
            "keyfile path is required for device_keyfile"
        ));
    }
    if config.model.trim().is_empty() {
        return Err(anyhow::anyhow!("api.model cannot be empty"));
    }
    Ok(())
}

/// Warning message for device keyfile security tier.
pub fn device_keyfile_warning() -> &'static str {
    "WARNING: You selected device_keyfile. This stores an unencrypted key on disk.\nAnyone who can read that file can decrypt your API key without a passphrase.\nContinue?"
}
