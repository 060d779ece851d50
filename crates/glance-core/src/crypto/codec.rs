//! Passphrase-based secret encryption.
//!
//! A secret is sealed with AES-256-GCM under a key derived from the
//! passphrase and a fresh random salt. The salt, nonce and ciphertext are
//! packed into one base64 string so the result can be stored as a single
//! value.
//!
//! Blob layout (before base64):
//!
//! ```text
//! salt (16 bytes) || nonce (12 bytes) || ciphertext || tag (16 bytes)
//! ```

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use super::key::{derive_key, DerivedKey};
use crate::error::{GlanceError, Result};

/// Size of the key-derivation salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_LENGTH: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
pub const TAG_LENGTH: usize = 16;

/// Decoded form of a stored secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    pub salt: [u8; SALT_LENGTH],
    pub nonce: [u8; NONCE_LENGTH],
    /// Ciphertext with the authentication tag appended.
    pub ciphertext: Vec<u8>,
}

impl EncryptedBlob {
    /// Concatenate salt, nonce and ciphertext.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SALT_LENGTH + NONCE_LENGTH + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split raw bytes by fixed offsets.
    ///
    /// Fails with `MalformedBlob` when the input is shorter than salt + nonce.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SALT_LENGTH + NONCE_LENGTH {
            return Err(GlanceError::MalformedBlob(format!(
                "expected at least {} bytes, got {}",
                SALT_LENGTH + NONCE_LENGTH,
                bytes.len()
            )));
        }
        let (salt_bytes, rest) = bytes.split_at(SALT_LENGTH);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LENGTH);

        let mut salt = [0u8; SALT_LENGTH];
        salt.copy_from_slice(salt_bytes);
        let mut nonce = [0u8; NONCE_LENGTH];
        nonce.copy_from_slice(nonce_bytes);

        Ok(Self {
            salt,
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Serialize as standard base64.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parse a base64 blob.
    pub fn decode(blob: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(blob.trim().as_bytes())
            .map_err(|e| GlanceError::MalformedBlob(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

/// Encrypt a secret under a passphrase.
///
/// Every call draws a fresh salt and nonce, so encrypting the same secret
/// twice yields two different blobs.
///
/// # Errors
///
/// Returns `GlanceError::Encryption` if the random source or cipher fails,
/// and `GlanceError::InvalidInput` for an empty passphrase.
///
/// # Examples
///
/// ```
/// use glance_core::crypto::{decrypt, encrypt};
/// use secrecy::ExposeSecret;
///
/// let blob = encrypt("sk-or-v1-abc", "correct horse").unwrap();
/// let secret = decrypt(&blob, "correct horse").unwrap();
/// assert_eq!(secret.expose_secret(), "sk-or-v1-abc");
/// ```
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LENGTH];
    random_bytes(&mut salt)?;
    let mut nonce = [0u8; NONCE_LENGTH];
    random_bytes(&mut nonce)?;

    let key = derive_key(passphrase, &salt)?;
    let cipher = cipher_for(&key)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| GlanceError::Encryption("AES-GCM encryption failed".to_string()))?;

    let blob = EncryptedBlob {
        salt,
        nonce,
        ciphertext,
    };
    tracing::debug!(bytes = blob.ciphertext.len(), "encrypted secret");
    Ok(blob.encode())
}

/// Decrypt a blob produced by [`encrypt`].
///
/// # Errors
///
/// - `GlanceError::MalformedBlob` if the blob is not base64 or too short
/// - `GlanceError::Authentication` if the passphrase is wrong or the data was
///   modified; no further detail is given
pub fn decrypt(blob: &str, passphrase: &str) -> Result<SecretString> {
    let parsed = EncryptedBlob::decode(blob)?;
    let key = derive_key(passphrase, &parsed.salt)?;
    let cipher = cipher_for(&key)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&parsed.nonce), parsed.ciphertext.as_slice())
        .map(Zeroizing::new)
        .map_err(|_| GlanceError::Authentication)?;

    let text = std::str::from_utf8(&plaintext).map_err(|_| {
        GlanceError::MalformedBlob("decrypted secret is not valid UTF-8".to_string())
    })?;
    Ok(SecretString::from(text.to_string()))
}

/// Re-encrypt a blob under a new passphrase.
///
/// The result has a fresh salt and nonce. Decryption errors propagate as-is.
pub fn rotate(blob: &str, old_passphrase: &str, new_passphrase: &str) -> Result<String> {
    let secret = decrypt(blob, old_passphrase)?;
    encrypt(secret.expose_secret(), new_passphrase)
}

fn cipher_for(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| GlanceError::Encryption(format!("Invalid key length: {}", e)))
}

fn random_bytes(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf)
        .map_err(|e| GlanceError::Encryption(format!("Random source unavailable: {}", e)))
}
