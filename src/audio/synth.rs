//! Synthetic carrier generation for demos and tests.

use crate::audio::SampleBuffer;
use crate::config::PCM_MAX_MAGNITUDE;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::f64::consts::PI;

/// Generate a sine-tone carrier.
///
/// `amplitude` is relative to full scale (0.5 gives the half-scale demo tone
/// every technique can comfortably embed into).
pub fn tone(freq_hz: f64, duration_secs: f64, sample_rate: u32, amplitude: f64) -> SampleBuffer {
    let n = (sample_rate as f64 * duration_secs) as usize;
    let peak = amplitude.clamp(0.0, 1.0) * PCM_MAX_MAGNITUDE;

    let samples = (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            ((2.0 * PI * freq_hz * t).sin() * peak) as i16
        })
        .collect();

    SampleBuffer::new(samples, sample_rate, 1)
}

/// Generate a deterministic white-noise carrier from a seed.
///
/// Broadband carriers exercise the detector-based techniques (echo, phase)
/// far better than a pure tone, and a fixed seed keeps tests reproducible.
pub fn noise(seed: u64, len: usize, sample_rate: u32, amplitude: f64) -> SampleBuffer {
    let peak = amplitude.clamp(0.0, 1.0) * PCM_MAX_MAGNITUDE;
    let mut rng = ChaCha12Rng::seed_from_u64(seed);

    let samples = (0..len)
        .map(|_| (rng.gen_range(-1.0..1.0) * peak) as i16)
        .collect();

    SampleBuffer::new(samples, sample_rate, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length_and_peak() {
        let buf = tone(440.0, 2.0, 44_100, 0.5);
        assert_eq!(buf.len(), 88_200);
        let max = buf.samples().iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(max <= 16_384);
        assert!(max > 16_000);
    }

    #[test]
    fn test_noise_is_deterministic() {
        let a = noise(7, 1000, 44_100, 0.5);
        let b = noise(7, 1000, 44_100, 0.5);
        assert_eq!(a, b);

        let c = noise(8, 1000, 44_100, 0.5);
        assert_ne!(a, c);
    }
}
