//! Data types persisted next to the encrypted secret.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping stored alongside the encrypted blob.
///
/// Holds no key material; safe to show to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSecretInfo {
    /// When the secret was last saved with `save`
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,

    /// When the secret was last re-encrypted under a new passphrase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotated_at: Option<DateTime<Utc>>,
}

impl StoredSecretInfo {
    pub fn saved_now() -> Self {
        Self {
            saved_at: Some(Utc::now()),
            rotated_at: None,
        }
    }
}
