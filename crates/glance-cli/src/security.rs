//! Device keyfile handling.
//!
//! The keyfile holds 32 random bytes. Their base64 form is used as the
//! passphrase for the stored key, so the device tier goes through the same
//! codec as a typed passphrase.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use glance_core::fs::write_private_atomic;

pub const KEYFILE_LENGTH: usize = 32;

pub fn generate_key_bytes() -> anyhow::Result<Zeroizing<[u8; KEYFILE_LENGTH]>> {
    let mut bytes = Zeroizing::new([0u8; KEYFILE_LENGTH]);
    getrandom::getrandom(&mut bytes[..])
        .map_err(|e| anyhow::anyhow!("Failed to generate key bytes: {}", e))?;
    Ok(bytes)
}

pub fn key_bytes_to_passphrase(bytes: &[u8]) -> Zeroizing<String> {
    Zeroizing::new(STANDARD.encode(bytes))
}

pub fn write_keyfile_plain(path: &Path, key_bytes: &[u8]) -> anyhow::Result<()> {
    if path.exists() {
        return Err(anyhow::anyhow!(
            "Keyfile already exists: {}",
            path.display()
        ));
    }
    write_private_atomic(path, key_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to write keyfile {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "wrote device keyfile");
    Ok(())
}

pub fn read_keyfile_plain(path: &Path) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read keyfile {}: {}", path.display(), e))?;
    if bytes.len() != KEYFILE_LENGTH {
        return Err(anyhow::anyhow!(
            "Keyfile {} has {} bytes, expected {}",
            path.display(),
            bytes.len(),
            KEYFILE_LENGTH
        ));
    }
    Ok(Zeroizing::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_keyfile_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("device.key");
        let bytes = generate_key_bytes().unwrap();

        write_keyfile_plain(&path, &bytes[..]).unwrap();
        let read = read_keyfile_plain(&path).unwrap();
        assert_eq!(read.as_slice(), &bytes[..]);
    }

    #[test]
    fn test_keyfile_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("device.key");
        write_keyfile_plain(&path, &[1u8; KEYFILE_LENGTH]).unwrap();

        let err = write_keyfile_plain(&path, &[2u8; KEYFILE_LENGTH]).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_truncated_keyfile_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("device.key");
        std::fs::write(&path, [0u8; 5]).unwrap();

        assert!(read_keyfile_plain(&path).is_err());
    }

    #[test]
    fn test_passphrase_is_base64() {
        let passphrase = key_bytes_to_passphrase(&[0u8; KEYFILE_LENGTH]);
        assert_eq!(passphrase.len(), 44);
        assert!(passphrase.ends_with('='));
    }
}
