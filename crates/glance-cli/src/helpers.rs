//! Input helpers for passphrases, the API key and text payloads.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use zeroize::Zeroizing;

use glance_core::crypto::validate_passphrase;

use crate::errors::CliError;

/// Whether prompts can be shown.
pub fn stdin_is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Read a non-blank value from an environment variable.
pub fn env_value(name: &str) -> Option<Zeroizing<String>> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Zeroizing::new)
}

/// Prompt once for the passphrase that unlocks the stored key.
pub fn prompt_passphrase(interactive: bool, env_var: &str) -> anyhow::Result<Zeroizing<String>> {
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No passphrase provided and no TTY available. Set {}.",
            env_var
        ))
        .into());
    }
    Password::new()
        .with_prompt("Passphrase")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Read a new passphrase from `env_var`, or prompt with confirmation.
///
/// The value must pass [`validate_passphrase`]. An invalid env value is an
/// error; an invalid prompted value is asked for again.
pub fn prompt_new_passphrase(env_var: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_value(env_var) {
        validate_passphrase(&value).map_err(|e| {
            CliError::invalid_input(format!("Passphrase does not meet requirements: {}", e))
        })?;
        return Ok(value);
    }
    if !stdin_is_interactive() {
        return Err(CliError::invalid_input(format!(
            "No passphrase provided and no TTY available. Set {}.",
            env_var
        ))
        .into());
    }
    loop {
        let passphrase = Password::new()
            .with_prompt("Enter new passphrase")
            .with_confirmation("Confirm passphrase", "Passphrases do not match")
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;
        if let Err(err) = validate_passphrase(&passphrase) {
            eprintln!("Passphrase does not meet requirements: {}", err);
            continue;
        }
        return Ok(passphrase);
    }
}

/// Read the API key from `--value`, piped stdin, or a hidden prompt.
pub fn read_api_key(value: Option<String>) -> anyhow::Result<Zeroizing<String>> {
    let key = if let Some(value) = value {
        Zeroizing::new(value)
    } else if !stdin_is_interactive() {
        let mut buffer = Zeroizing::new(String::new());
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        Zeroizing::new(buffer.trim().to_string())
    } else {
        Password::new()
            .with_prompt("API key")
            .interact()
            .map(|v| Zeroizing::new(v.trim().to_string()))
            .map_err(|e| anyhow::anyhow!("Failed to read API key: {}", e))?
    };

    if key.trim().is_empty() {
        return Err(CliError::invalid_input("API key cannot be empty").into());
    }
    Ok(key)
}

/// Read text from a file path, or from stdin when no path is given.
pub fn read_text_input(path: Option<&str>) -> anyhow::Result<String> {
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e));
    }
    if stdin_is_interactive() {
        return Err(CliError::invalid_input(
            "No input provided. Pass a file or pipe content via stdin.",
        )
        .into());
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(buffer)
}

/// Mask a secret for display, keeping a short prefix and suffix.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len().max(4));
    }
    let prefix: String = chars[..6].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
