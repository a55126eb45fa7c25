//! Byte-to-bit expansion and regrouping.
//!
//! Bits are stored one per element (0/1), most significant bit first.
//! Expansion always operates on raw bytes — text payloads enter as UTF-8
//! bytes, never as code points, so non-ASCII content round-trips.

use crate::error::{Error, Result};

/// Expand bytes into bits, MSB first.
pub fn bytes_to_bits(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for &byte in data {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    bits
}

/// Regroup bits into bytes, MSB first.
///
/// Fails with [`Error::MalformedPayload`] when the bit count is not a
/// multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(Error::MalformedPayload { bits: bits.len() });
    }

    let bytes = bits
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | (bit & 1)))
        .collect();
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_is_msb_first() {
        assert_eq!(bytes_to_bits(&[0b1010_0001]), vec![1, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_roundtrip() {
        let data = b"Hello, \xc3\xa9cho!";
        assert_eq!(bits_to_bytes(&bytes_to_bits(data)).unwrap(), data.to_vec());
    }

    #[test]
    fn test_empty() {
        assert!(bytes_to_bits(&[]).is_empty());
        assert_eq!(bits_to_bytes(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_unaligned_is_malformed() {
        let result = bits_to_bytes(&[1, 0, 1]);
        assert!(matches!(result, Err(Error::MalformedPayload { bits: 3 })));
    }
}
