//! Storage adapter trait definition.
//!
//! The `SecretStore` trait is the key/value seam between the vault and
//! wherever strings are persisted (a JSON file for the CLI, browser extension
//! storage for other hosts, a map in tests).

use crate::error::Result;

/// Key/value storage for encrypted secrets.
///
/// Implementations only move opaque strings around. They never see plaintext
/// secrets or passphrases.
pub trait SecretStore {
    /// Read a value.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(value))` if present, `Ok(None)` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `GlanceError::Storage` if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: SecretStore + ?Sized> SecretStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn SecretStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
