//! Cryptographic operations for Glance.
//!
//! - **PBKDF2-HMAC-SHA256** (100,000 rounds) derives a 256-bit key from a
//!   passphrase and a random per-blob salt
//! - **AES-256-GCM** seals the secret with a random nonce
//!
//! ## Security Model
//!
//! - A fresh salt and nonce for every encryption; nothing is reused
//! - Derived keys live for a single call and are zeroized on drop
//! - Decryption failures never reveal whether the passphrase or the data was at fault
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the stored blob
//! - Offline guessing of the passphrase (slowed by the KDF)
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to process memory while a secret is in use

pub mod codec;
pub mod key;
pub mod passphrase;

pub use codec::{decrypt, encrypt, rotate, EncryptedBlob, NONCE_LENGTH, SALT_LENGTH, TAG_LENGTH};
pub use key::{derive_key, DerivedKey, KEY_LENGTH, PBKDF2_ITERATIONS};
pub use passphrase::validate_passphrase;
