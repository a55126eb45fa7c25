//! Raw key-blob handling.
//!
//! Keys are 32 random bytes persisted verbatim (no derivation, no armor);
//! callers must validate the length before use, which `load_key` does.

use crate::config::cipher_params::KEY_LENGTH;
use crate::error::{Error, Result};
use rand::RngCore;
use std::fs;
use std::path::Path;

/// Generate a fresh random 256-bit key.
pub fn generate_key() -> [u8; KEY_LENGTH] {
    let mut key = [0u8; KEY_LENGTH];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Load and length-validate a key blob.
pub fn load_key(path: &Path) -> Result<[u8; KEY_LENGTH]> {
    let blob = fs::read(path)?;
    blob.as_slice()
        .try_into()
        .map_err(|_| Error::InvalidKeyLength {
            expected: KEY_LENGTH,
            found: blob.len(),
        })
}

/// Persist a key blob verbatim.
pub fn save_key(path: &Path, key: &[u8; KEY_LENGTH]) -> Result<()> {
    fs::write(path, key)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.bin");

        let key = generate_key();
        save_key(&path, &key).unwrap();
        assert_eq!(load_key(&path).unwrap(), key);
    }

    #[test]
    fn test_load_rejects_wrong_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.bin");
        std::fs::write(&path, [0u8; 31]).unwrap();

        assert!(matches!(
            load_key(&path),
            Err(Error::InvalidKeyLength {
                expected: 32,
                found: 31
            })
        ));
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(generate_key(), generate_key());
    }
}
