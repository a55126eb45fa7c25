//! AES-256-CBC encryption with PKCS#7 padding.

use crate::config::cipher_params::{IV_LENGTH, KEY_LENGTH};
use crate::error::{Error, Result};
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES-256-CBC cipher over a validated 32-byte key.
pub struct FileCipher {
    key: [u8; KEY_LENGTH],
}

impl FileCipher {
    /// Create a cipher, validating the key length first.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LENGTH] = key.try_into().map_err(|_| Error::InvalidKeyLength {
            expected: KEY_LENGTH,
            found: key.len(),
        })?;
        Ok(Self { key })
    }

    /// Encrypt with a random IV.
    ///
    /// Returns the IV and the padded ciphertext separately; both are needed
    /// to decrypt.
    pub fn encrypt(&self, plaintext: &[u8]) -> ([u8; IV_LENGTH], Vec<u8>) {
        let mut iv = [0u8; IV_LENGTH];
        rand::thread_rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
        (iv, ciphertext)
    }

    /// Decrypt data produced by [`FileCipher::encrypt`].
    ///
    /// A wrong key or corrupted ciphertext surfaces as
    /// [`Error::Decryption`] via the padding check.
    pub fn decrypt(&self, iv: &[u8; IV_LENGTH], ciphertext: &[u8]) -> Result<Vec<u8>> {
        Aes256CbcDec::new(&self.key.into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Error::Decryption)
    }
}

/// Encrypt into a single `IV || ciphertext` blob (the on-disk layout).
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let cipher = FileCipher::new(key)?;
    let (iv, ciphertext) = cipher.encrypt(plaintext);

    let mut blob = Vec::with_capacity(IV_LENGTH + ciphertext.len());
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt an `IV || ciphertext` blob produced by [`seal`].
pub fn open(blob: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let cipher = FileCipher::new(key)?;
    if blob.len() < IV_LENGTH {
        return Err(Error::Decryption);
    }

    let (iv_bytes, ciphertext) = blob.split_at(IV_LENGTH);
    let iv: [u8; IV_LENGTH] = iv_bytes.try_into().expect("split length");
    cipher.decrypt(&iv, ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"Hidden layer one: the AES-protected payload.";
        let key = [7u8; KEY_LENGTH];

        let cipher = FileCipher::new(&key).unwrap();
        let (iv, ciphertext) = cipher.encrypt(plaintext);
        let decrypted = cipher.decrypt(&iv, &ciphertext).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_wrong_key_never_yields_plaintext() {
        let plaintext = b"Secret data";
        let cipher = FileCipher::new(&[1u8; KEY_LENGTH]).unwrap();
        let (iv, ciphertext) = cipher.encrypt(plaintext);

        let wrong = FileCipher::new(&[2u8; KEY_LENGTH]).unwrap();
        match wrong.decrypt(&iv, &ciphertext) {
            Err(Error::Decryption) => {}
            Err(other) => panic!("unexpected error {other}"),
            // PKCS#7 leaves a ~1/256 chance the padding parses; even then
            // the blocks are garbage, never the plaintext.
            Ok(data) => assert_ne!(data, plaintext),
        }
    }

    #[test]
    fn test_invalid_key_length_rejected() {
        let result = FileCipher::new(&[0u8; 16]);
        assert!(matches!(
            result,
            Err(Error::InvalidKeyLength {
                expected: 32,
                found: 16
            })
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails_or_garbles() {
        let plaintext = b"padding check should trip";
        let key = [9u8; KEY_LENGTH];
        let cipher = FileCipher::new(&key).unwrap();
        let (iv, mut ciphertext) = cipher.encrypt(plaintext);

        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0xFF;

        match cipher.decrypt(&iv, &ciphertext) {
            Err(Error::Decryption) => {}
            Err(other) => panic!("unexpected error {other}"),
            Ok(data) => assert_ne!(data, plaintext),
        }
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = [3u8; KEY_LENGTH];
        let data: Vec<u8> = (0..10_000).map(|i| (i % 256) as u8).collect();

        let blob = seal(&data, &key).unwrap();
        assert_eq!(blob.len() % 16, 0);
        assert!(blob.len() > data.len());

        assert_eq!(open(&blob, &key).unwrap(), data);
    }

    #[test]
    fn test_open_truncated_blob() {
        let key = [4u8; KEY_LENGTH];
        assert!(matches!(open(&[0u8; 10], &key), Err(Error::Decryption)));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = [5u8; KEY_LENGTH];
        let blob = seal(b"", &key).unwrap();
        assert_eq!(open(&blob, &key).unwrap(), b"");
    }
}
