//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Keys are derived from a passphrase and a per-blob random salt. The
//! parameters are fixed so blobs written by any Glance client decrypt in any
//! other.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{GlanceError, Result};

/// PBKDF2 iteration count. Changing this breaks every stored blob.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

/// Minimum salt length accepted by [`derive_key`].
pub const MIN_SALT_LENGTH: usize = 16;

/// A symmetric key derived from a passphrase.
///
/// Key material is zeroized when dropped. A key belongs to exactly one
/// encrypt or decrypt call and is never cached.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase.
///
/// # Arguments
///
/// * `passphrase` - Non-empty passphrase
/// * `salt` - Random salt, at least 16 bytes, stored alongside the ciphertext
///
/// # Security
///
/// - Same passphrase + salt always produces same key (deterministic)
/// - Different salt produces different key, so a salt must never be reused
///
/// # Examples
///
/// ```
/// use glance_core::crypto::derive_key;
///
/// let salt = b"unique-salt-16by";
/// let key = derive_key("my-passphrase", salt).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(GlanceError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    if salt.len() < MIN_SALT_LENGTH {
        return Err(GlanceError::InvalidInput(format!(
            "Salt must be at least {} bytes",
            MIN_SALT_LENGTH
        )));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        salt,
        PBKDF2_ITERATIONS,
        &mut key_bytes,
    );
    tracing::trace!(iterations = PBKDF2_ITERATIONS, "derived key");

    Ok(DerivedKey::from_bytes(key_bytes))
}
