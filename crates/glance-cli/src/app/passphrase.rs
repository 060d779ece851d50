//! Unlocking the stored key, with retry logic for typed passphrases.

use secrecy::SecretString;
use zeroize::Zeroizing;

use glance_core::storage::FileStore;
use glance_core::{GlanceError, SecretVault};

use crate::config::SecurityTier;
use crate::constants::{env_vars, MAX_PASSPHRASE_ATTEMPTS};
use crate::errors::CliError;
use crate::helpers::{env_value, prompt_passphrase, stdin_is_interactive};
use crate::security::{key_bytes_to_passphrase, read_keyfile_plain};

use super::security_config::SecurityConfig;

/// A decrypted key together with the passphrase that unlocked it.
pub struct Unlocked {
    pub secret: SecretString,
    pub passphrase: Zeroizing<String>,
}

/// Decrypt the stored key according to the security tier.
///
/// Device keyfile first, then GLANCE_PASSPHRASE (one attempt), then an
/// interactive prompt with up to three attempts.
pub fn unlock_with_retry(
    vault: &SecretVault<FileStore>,
    security: &SecurityConfig,
) -> anyhow::Result<Unlocked> {
    if !vault.exists()? {
        return Err(GlanceError::NotFound("no API key stored".to_string()).into());
    }

    if matches!(security.tier, SecurityTier::DeviceKeyfile) {
        let passphrase = device_passphrase(security)?;
        let secret = vault.load(&passphrase)?;
        return Ok(Unlocked { secret, passphrase });
    }

    if let Some(passphrase) = env_value(env_vars::PASSPHRASE) {
        let secret = vault.load(&passphrase)?;
        return Ok(Unlocked { secret, passphrase });
    }

    let interactive = stdin_is_interactive();
    let max_attempts = if interactive { MAX_PASSPHRASE_ATTEMPTS } else { 1 };
    let mut attempts = 0;

    loop {
        attempts += 1;
        let passphrase = prompt_passphrase(interactive, env_vars::PASSPHRASE)?;
        match vault.load(&passphrase) {
            Ok(secret) => return Ok(Unlocked { secret, passphrase }),
            Err(GlanceError::Authentication) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    return Err(CliError::auth_failed_with_hint(
                        "Too many failed passphrase attempts.",
                        "Hint: If you forgot your passphrase, clear the key with `glance key clear` and store it again.",
                    )
                    .into());
                }
                eprintln!(
                    "Incorrect passphrase. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Passphrase for locking a newly stored key.
///
/// The device tier uses the keyfile; otherwise GLANCE_PASSPHRASE or a
/// confirmed prompt.
pub fn passphrase_for_new_secret(security: &SecurityConfig) -> anyhow::Result<Zeroizing<String>> {
    match security.tier {
        SecurityTier::DeviceKeyfile => device_passphrase(security),
        SecurityTier::Passphrase => crate::helpers::prompt_new_passphrase(env_vars::PASSPHRASE),
    }
}

fn device_passphrase(security: &SecurityConfig) -> anyhow::Result<Zeroizing<String>> {
    let keyfile_path = security
        .keyfile_path
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Keyfile path is required for device_keyfile"))?;
    if !keyfile_path.exists() {
        return Err(CliError::not_found(
            format!("No keyfile found at {}", keyfile_path.display()),
            "Hint: Run `glance init --tier device_keyfile` to create one.",
        )
        .into());
    }
    let key_bytes = read_keyfile_plain(keyfile_path)?;
    Ok(key_bytes_to_passphrase(&key_bytes))
}
