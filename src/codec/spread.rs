//! Spread-spectrum embedding.
//!
//! A pseudorandom ±1 chip sequence, regenerated deterministically from the
//! seed, is scaled to a small fixed amplitude and added into the carrier one
//! chip window per bit, sign-flipped for bit 0. Decoding regenerates the
//! identical sequence and correlates each carrier segment against its chip
//! window: a positive dot product decodes as 1.
//!
//! Exact chip reproducibility across encode and decode is a hard invariant
//! of the technique, not an approximation — both sides must construct the
//! same generator from the same seed.

use crate::config::SPREAD_AMPLITUDE;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Regenerate the deterministic chip sequence for a seed.
///
/// Values are ±[`SPREAD_AMPLITUDE`], full-scale-relative.
pub fn chip_sequence(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.gen_bool(0.5) {
                SPREAD_AMPLITUDE
            } else {
                -SPREAD_AMPLITUDE
            }
        })
        .collect()
}

/// Add the sign-modulated chip sequence into the carrier.
pub fn embed(carrier: &[f64], bits: &[u8], chip_size: usize, seed: u64) -> Vec<f64> {
    debug_assert!(bits.len() * chip_size <= carrier.len());
    let chips = chip_sequence(seed, bits.len() * chip_size);

    let mut out = carrier.to_vec();
    for (i, &bit) in bits.iter().enumerate() {
        let sign = if bit == 1 { 1.0 } else { -1.0 };
        let start = i * chip_size;
        for j in 0..chip_size {
            out[start + j] += chips[start + j] * sign;
        }
    }
    out
}

/// Correlate one carrier segment against its chip window.
pub fn correlate_bit(segment: &[f64], chips: &[f64]) -> u8 {
    let correlation: f64 = segment.iter().zip(chips).map(|(&s, &c)| s * c).sum();
    u8::from(correlation > 0.0)
}

/// Extract a fixed number of bits by per-window correlation.
pub fn extract_bits(carrier: &[f64], bit_count: usize, chip_size: usize, seed: u64) -> Vec<u8> {
    let chips = chip_sequence(seed, bit_count * chip_size);
    carrier
        .chunks_exact(chip_size)
        .take(bit_count)
        .zip(chips.chunks_exact(chip_size))
        .map(|(segment, chip)| correlate_bit(segment, chip))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_sequence_reproducible() {
        assert_eq!(chip_sequence(42, 5000), chip_sequence(42, 5000));
        assert_ne!(chip_sequence(42, 5000), chip_sequence(43, 5000));
    }

    #[test]
    fn test_chip_prefix_stable_across_lengths() {
        // Streaming decoders rely on the first N chips being independent of
        // how many are requested.
        let long = chip_sequence(7, 2000);
        let short = chip_sequence(7, 500);
        assert_eq!(&long[..500], &short[..]);
    }

    #[test]
    fn test_embed_extract_roundtrip_on_silence() {
        let bits = [1u8, 0, 1, 1, 0, 0, 1, 0];
        let chip_size = 64;
        let carrier = vec![0.0f64; bits.len() * chip_size];

        let stego = embed(&carrier, &bits, chip_size, 42);
        let decoded = extract_bits(&stego, bits.len(), chip_size, 42);
        assert_eq!(decoded, bits);
    }

    #[test]
    fn test_embed_extract_roundtrip_over_tone() {
        let bits = [0u8, 1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1];
        let chip_size = 1000;
        let carrier: Vec<f64> = (0..bits.len() * chip_size)
            .map(|i| 0.5 * (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44_100.0).sin())
            .collect();

        let stego = embed(&carrier, &bits, chip_size, 99);
        let decoded = extract_bits(&stego, bits.len(), chip_size, 99);
        assert_eq!(decoded, bits);
    }

    #[test]
    fn test_wrong_seed_does_not_decode() {
        let bits = [1u8, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0];
        let chip_size = 500;
        let carrier = vec![0.0f64; bits.len() * chip_size];

        let stego = embed(&carrier, &bits, chip_size, 1);
        let decoded = extract_bits(&stego, bits.len(), chip_size, 2);
        assert_ne!(decoded, bits);
    }
}
