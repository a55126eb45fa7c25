//! Cryptographic collaborator for payload protection.
//!
//! AES-256-CBC with PKCS#7 padding: `encrypt` returns a fresh IV alongside
//! the ciphertext, `decrypt` needs the same IV and key back. Key material is
//! a raw 32-byte blob persisted as-is.

mod cipher;
mod key;

pub use cipher::{open, seal, FileCipher};
pub use key::{generate_key, load_key, save_key};
