//! Pre-embed capacity validation.

use serde::{Deserialize, Serialize};

/// Outcome of a single capacity check.
///
/// Pure computed value: nothing is reserved or mutated by producing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityReport {
    /// Bits the framed message needs.
    pub bits_required: usize,
    /// Embedding slots the carrier offers for the chosen technique.
    pub bits_available: usize,
    /// Whether the message fits.
    pub fits: bool,
}

/// Compare a framed bitstream length against a carrier's slot count.
///
/// Slot semantics are technique-specific (one sample per bit for LSB, one
/// block or window per bit for the others); the caller supplies the count.
/// Embedding must refuse to proceed when `fits` is false.
pub fn check(bits_required: usize, slots_available: usize) -> CapacityReport {
    CapacityReport {
        bits_required,
        bits_available: slots_available,
        fits: bits_required <= slots_available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let report = check(1024, 1024);
        assert!(report.fits);
    }

    #[test]
    fn test_one_bit_over() {
        let report = check(1025, 1024);
        assert!(!report.fits);
        assert_eq!(report.bits_required, 1025);
        assert_eq!(report.bits_available, 1024);
    }

    #[test]
    fn test_empty_message_fits_anywhere() {
        assert!(check(0, 0).fits);
    }
}
