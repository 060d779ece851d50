//! Secret vault: encrypted API key persistence over a [`SecretStore`].
//!
//! The codec never touches storage. The vault is the caller that pairs it
//! with a store: it writes the blob on save, reads and decrypts on load,
//! replaces the blob wholesale on rotation and deletes it on reset.

use secrecy::SecretString;

use super::traits::SecretStore;
use super::types::StoredSecretInfo;
use crate::crypto;
use crate::error::{GlanceError, Result};

/// Store key holding the encrypted API key blob.
pub const SECRET_KEY: &str = "encrypted_api_key";

/// Store key holding [`StoredSecretInfo`] as JSON.
pub const SECRET_INFO_KEY: &str = "encrypted_api_key.meta";

/// Encrypted secret persistence.
#[derive(Debug)]
pub struct SecretVault<S> {
    store: S,
}

impl<S: SecretStore> SecretVault<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Whether an encrypted secret is stored.
    pub fn exists(&self) -> Result<bool> {
        Ok(self.store.get(SECRET_KEY)?.is_some())
    }

    /// Encrypt `secret` under `passphrase` and store it, replacing any
    /// previous secret.
    pub fn save(&mut self, secret: &str, passphrase: &str) -> Result<StoredSecretInfo> {
        let blob = crypto::encrypt(secret, passphrase)?;
        self.store.set(SECRET_KEY, &blob)?;

        let info = StoredSecretInfo::saved_now();
        self.write_info(&info)?;
        tracing::info!("stored encrypted secret");
        Ok(info)
    }

    /// Decrypt the stored secret.
    ///
    /// # Errors
    ///
    /// - `GlanceError::NotFound` if nothing is stored
    /// - `GlanceError::MalformedBlob` / `GlanceError::Authentication` from the codec
    pub fn load(&self, passphrase: &str) -> Result<SecretString> {
        let blob = self.read_blob()?;
        crypto::decrypt(&blob, passphrase)
    }

    /// Re-encrypt the stored secret under a new passphrase.
    pub fn rotate(&mut self, old_passphrase: &str, new_passphrase: &str) -> Result<StoredSecretInfo> {
        let blob = self.read_blob()?;
        let rotated = crypto::rotate(&blob, old_passphrase, new_passphrase)?;
        self.store.set(SECRET_KEY, &rotated)?;

        let mut info = self.read_info()?.unwrap_or_default();
        info.rotated_at = Some(chrono::Utc::now());
        self.write_info(&info)?;
        tracing::info!("rotated secret passphrase");
        Ok(info)
    }

    /// Delete the stored secret and its metadata.
    ///
    /// Returns `true` if a secret was present.
    pub fn clear(&mut self) -> Result<bool> {
        let existed = self.exists()?;
        self.store.remove(SECRET_KEY)?;
        self.store.remove(SECRET_INFO_KEY)?;
        if existed {
            tracing::info!("cleared stored secret");
        }
        Ok(existed)
    }

    /// Metadata for the stored secret, or `None` if nothing is stored.
    pub fn info(&self) -> Result<Option<StoredSecretInfo>> {
        if !self.exists()? {
            return Ok(None);
        }
        Ok(Some(self.read_info()?.unwrap_or_default()))
    }

    fn read_blob(&self) -> Result<String> {
        self.store
            .get(SECRET_KEY)?
            .ok_or_else(|| GlanceError::NotFound("no API key stored".to_string()))
    }

    fn read_info(&self) -> Result<Option<StoredSecretInfo>> {
        match self.store.get(SECRET_INFO_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(info) => Ok(Some(info)),
                Err(err) => {
                    tracing::warn!("ignoring unreadable secret metadata: {}", err);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    fn write_info(&mut self, info: &StoredSecretInfo) -> Result<()> {
        let raw = serde_json::to_string(info)?;
        self.store.set(SECRET_INFO_KEY, &raw)
    }
}
