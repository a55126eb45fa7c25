//! Embedding techniques.
//!
//! Four interchangeable strategies share one contract: a technique owns only
//! its parameters, consumes a carrier by reference, and produces a fresh
//! stego buffer (encode) or a recovered message (decode). None of the
//! techniques are self-describing in the carrier — the decoding side must
//! supply the same parameters it encoded with.

mod echo;
mod lsb;
mod phase;
mod spread;

use crate::audio::{self, SampleBuffer};
use crate::config::EchoParams;
use crate::error::{Error, Result};
use crate::framing::{self, bits_to_bytes, Framer};
use serde::{Deserialize, Serialize};

pub use spread::chip_sequence;

/// An embedding technique with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    /// Bit-plane substitution at `bit_position` (0 = least significant).
    Lsb { bit_position: u8 },
    /// Delay-based echo hiding.
    EchoHiding(EchoParams),
    /// FFT block phase coding.
    PhaseCoding { block_size: usize },
    /// Pseudorandom chip correlation.
    SpreadSpectrum { chip_size: usize, seed: u64 },
}

impl Technique {
    /// Check the parameter set before touching any carrier.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Technique::Lsb { bit_position } => {
                if bit_position > 7 {
                    return Err(Error::InvalidParameter(format!(
                        "LSB bit position must be 0..=7, got {bit_position}"
                    )));
                }
            }
            Technique::EchoHiding(params) => {
                params.validate().map_err(Error::InvalidParameter)?;
            }
            Technique::PhaseCoding { block_size } => {
                if block_size < 8 {
                    return Err(Error::InvalidParameter(format!(
                        "phase-coding block size must be at least 8, got {block_size}"
                    )));
                }
            }
            Technique::SpreadSpectrum { chip_size, .. } => {
                if chip_size == 0 {
                    return Err(Error::InvalidParameter(
                        "spread-spectrum chip size must be nonzero".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Embedding slots this technique finds in a carrier: one bit per slot.
    pub fn slots(&self, carrier: &SampleBuffer) -> usize {
        match *self {
            Technique::Lsb { .. } => carrier.len(),
            Technique::EchoHiding(params) => carrier.len() / params.window_len(),
            Technique::PhaseCoding { block_size } => carrier.len() / block_size,
            Technique::SpreadSpectrum { chip_size, .. } => carrier.len() / chip_size,
        }
    }

    /// Embed a framed bitstream, producing a new buffer.
    ///
    /// Fails fast with [`Error::CapacityExceeded`] before any work when the
    /// bits do not fit; the carrier is never partially mutated.
    pub fn encode(&self, carrier: &SampleBuffer, bits: &[u8]) -> Result<SampleBuffer> {
        self.validate()?;

        let report = framing::check(bits.len(), self.slots(carrier));
        if !report.fits {
            return Err(Error::CapacityExceeded {
                required: report.bits_required,
                available: report.bits_available,
            });
        }

        log::debug!(
            "encode {:?}: {} bits into {} slots",
            self,
            report.bits_required,
            report.bits_available
        );

        let samples = match *self {
            Technique::Lsb { bit_position } => lsb::embed(carrier.samples(), bits, bit_position),
            Technique::EchoHiding(params) => {
                audio::to_pcm(&echo::embed(&carrier.to_float(), bits, params))
            }
            Technique::PhaseCoding { block_size } => {
                audio::to_pcm(&phase::embed(&carrier.to_float(), bits, block_size))
            }
            Technique::SpreadSpectrum { chip_size, seed } => {
                audio::to_pcm(&spread::embed(&carrier.to_float(), bits, chip_size, seed))
            }
        };

        Ok(carrier.with_samples(samples))
    }

    /// Recover a message by streaming per-slot bits into the marker scanner.
    ///
    /// Stops at the first marker match; [`Error::DelimiterNotFound`] when the
    /// carrier is exhausted first.
    pub fn decode(&self, carrier: &SampleBuffer, framer: &Framer) -> Result<Vec<u8>> {
        self.validate()?;

        let mut scanner = framer.scanner();
        let mut bits: Vec<u8> = Vec::new();
        let mut matched = false;

        match *self {
            Technique::Lsb { bit_position } => {
                for &sample in carrier.samples() {
                    let bit = lsb::bit_at(sample, bit_position);
                    bits.push(bit);
                    if scanner.push(bit) {
                        matched = true;
                        break;
                    }
                }
            }
            Technique::EchoHiding(params) => {
                let working = carrier.to_float();
                for window in working.chunks_exact(params.window_len()) {
                    let bit = echo::detect_bit(window, params);
                    bits.push(bit);
                    if scanner.push(bit) {
                        matched = true;
                        break;
                    }
                }
            }
            Technique::PhaseCoding { block_size } => {
                let working = carrier.to_float();
                let mut analyzer = phase::Analyzer::new(block_size);
                for block in working.chunks_exact(block_size) {
                    let bit = analyzer.detect_bit(block);
                    bits.push(bit);
                    if scanner.push(bit) {
                        matched = true;
                        break;
                    }
                }
            }
            Technique::SpreadSpectrum { chip_size, seed } => {
                let working = carrier.to_float();
                let chips = chip_sequence(seed, (working.len() / chip_size) * chip_size);
                for (segment, chip) in working
                    .chunks_exact(chip_size)
                    .zip(chips.chunks_exact(chip_size))
                {
                    let bit = spread::correlate_bit(segment, chip);
                    bits.push(bit);
                    if scanner.push(bit) {
                        matched = true;
                        break;
                    }
                }
            }
        }

        if !matched {
            return Err(Error::DelimiterNotFound);
        }

        let payload_len = bits.len() - framer.marker_len();
        bits_to_bytes(&bits[..payload_len])
    }

    /// Extract a fixed number of raw bits without marker scanning.
    ///
    /// Useful for bit-error-rate measurement against a known bitstream.
    pub fn extract_bits(&self, carrier: &SampleBuffer, bit_count: usize) -> Result<Vec<u8>> {
        self.validate()?;

        let slots = self.slots(carrier);
        if bit_count > slots {
            return Err(Error::CapacityExceeded {
                required: bit_count,
                available: slots,
            });
        }

        let bits = match *self {
            Technique::Lsb { bit_position } => carrier.samples()[..bit_count]
                .iter()
                .map(|&s| lsb::bit_at(s, bit_position))
                .collect(),
            Technique::EchoHiding(params) => {
                let working = carrier.to_float();
                working
                    .chunks_exact(params.window_len())
                    .take(bit_count)
                    .map(|window| echo::detect_bit(window, params))
                    .collect()
            }
            Technique::PhaseCoding { block_size } => {
                let working = carrier.to_float();
                let mut analyzer = phase::Analyzer::new(block_size);
                working
                    .chunks_exact(block_size)
                    .take(bit_count)
                    .map(|block| analyzer.detect_bit(block))
                    .collect()
            }
            Technique::SpreadSpectrum { chip_size, seed } => {
                let working = carrier.to_float();
                spread::extract_bits(&working, bit_count, chip_size, seed)
            }
        };

        Ok(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth;
    use crate::config::DEFAULT_MARKER;

    #[test]
    fn test_invalid_bit_position_rejected() {
        let technique = Technique::Lsb { bit_position: 8 };
        assert!(technique.validate().is_err());
    }

    #[test]
    fn test_slots_per_technique() {
        let carrier = synth::noise(1, 10_000, 44_100, 0.5);

        assert_eq!(Technique::Lsb { bit_position: 0 }.slots(&carrier), 10_000);
        assert_eq!(
            Technique::PhaseCoding { block_size: 512 }.slots(&carrier),
            19
        );
        assert_eq!(
            Technique::SpreadSpectrum {
                chip_size: 1000,
                seed: 42
            }
            .slots(&carrier),
            10
        );

        let params = EchoParams {
            delay_short: 44,
            delay_long: 88,
            decay: 0.5,
        };
        assert_eq!(Technique::EchoHiding(params).slots(&carrier), 56);
    }

    #[test]
    fn test_capacity_exceeded_before_mutation() {
        let carrier = synth::noise(1, 64, 44_100, 0.5);
        let technique = Technique::Lsb { bit_position: 0 };
        let framer = Framer::new(DEFAULT_MARKER);

        // 64 slots; framed "too long" needs far more.
        let bits = framer.encode(b"much too long for this carrier");
        let result = technique.encode(&carrier, &bits);
        assert!(matches!(result, Err(Error::CapacityExceeded { .. })));
    }

    #[test]
    fn test_extract_bits_respects_slot_count() {
        let carrier = synth::noise(1, 64, 44_100, 0.5);
        let technique = Technique::Lsb { bit_position: 0 };
        assert!(technique.extract_bits(&carrier, 65).is_err());
        assert_eq!(technique.extract_bits(&carrier, 64).unwrap().len(), 64);
    }
}
