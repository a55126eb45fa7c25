//! Signal-quality measurement between a carrier and its stego version.

use serde::{Deserialize, Serialize};

/// SNR / PSNR of a modified signal against the original, in dB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Signal-to-noise ratio: `10 * log10(signal_power / mse)`.
    pub snr_db: f64,
    /// Peak signal-to-noise ratio: `10 * log10(peak^2 / mse)`.
    pub psnr_db: f64,
}

/// Measure SNR and PSNR between two sample sequences.
///
/// Both sequences are truncated to the shorter length. Bit-identical inputs
/// yield `+inf` for both metrics. Read-only: neither input is modified.
pub fn measure(original: &[i16], modified: &[i16]) -> QualityReport {
    let len = original.len().min(modified.len());
    if len == 0 {
        return QualityReport {
            snr_db: f64::INFINITY,
            psnr_db: f64::INFINITY,
        };
    }

    let mut sum_sq_err = 0.0f64;
    let mut sum_sq_signal = 0.0f64;
    let mut peak = 0.0f64;

    for i in 0..len {
        let orig = original[i] as f64;
        let diff = orig - modified[i] as f64;
        sum_sq_err += diff * diff;
        sum_sq_signal += orig * orig;
        peak = peak.max(orig.abs());
    }

    let mse = sum_sq_err / len as f64;
    if mse == 0.0 {
        return QualityReport {
            snr_db: f64::INFINITY,
            psnr_db: f64::INFINITY,
        };
    }

    let signal_power = sum_sq_signal / len as f64;
    QualityReport {
        snr_db: 10.0 * (signal_power / mse).log10(),
        psnr_db: 10.0 * (peak * peak / mse).log10(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth;

    #[test]
    fn test_identical_is_infinite() {
        let buf = synth::tone(440.0, 0.2, 44_100, 0.5);
        let report = measure(buf.samples(), buf.samples());
        assert!(report.snr_db.is_infinite());
        assert!(report.psnr_db.is_infinite());
    }

    #[test]
    fn test_truncates_to_shorter() {
        let original = [100i16, 200, 300, 400];
        let modified = [100i16, 200];
        let report = measure(&original, &modified);
        assert!(report.snr_db.is_infinite());
    }

    #[test]
    fn test_snr_decreases_with_noise_amplitude() {
        let carrier = synth::tone(440.0, 0.5, 44_100, 0.5);

        let perturb = |amplitude: i16| -> Vec<i16> {
            carrier
                .samples()
                .iter()
                .enumerate()
                .map(|(i, &s)| {
                    let noise = if i % 2 == 0 { amplitude } else { -amplitude };
                    s.saturating_add(noise)
                })
                .collect()
        };

        let slight = measure(carrier.samples(), &perturb(10));
        let moderate = measure(carrier.samples(), &perturb(100));
        let heavy = measure(carrier.samples(), &perturb(1000));

        assert!(slight.snr_db > moderate.snr_db);
        assert!(moderate.snr_db > heavy.snr_db);
        assert!(slight.psnr_db > moderate.psnr_db);
    }
}
