//! Storage layer for encrypted secrets.
//!
//! - **traits**: the `SecretStore` key/value adapter
//! - **memory** / **file**: adapter implementations
//! - **vault**: `SecretVault`, which pairs the codec with a store

pub mod file;
pub mod memory;
pub mod traits;
pub mod types;
pub mod vault;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::SecretStore;
pub use types::StoredSecretInfo;
pub use vault::{SecretVault, SECRET_INFO_KEY, SECRET_KEY};
