//! Delay-based echo hiding.
//!
//! The carrier is split into non-overlapping windows of
//! `2 * max(delay_short, delay_long)` samples, one bit per window. Each
//! window gets a copy of itself added back, delayed by the short offset for
//! bit 0 or the long offset for bit 1 and attenuated by the decay factor.
//!
//! Detection compares the window's autocorrelation at the two candidate
//! lags; the embedded echo lifts the peak at its own lag. The decision is
//! statistical: residual carrier self-correlation at the wrong lag produces
//! a nonzero false-bit rate, worst for short windows and strongly periodic
//! carriers (a pure tone whose period divides a delay defeats the detector
//! entirely). Callers wanting hard guarantees should measure bit error on
//! their carrier class first.

use crate::config::EchoParams;

/// Add a decayed, delayed echo into each bit's window.
pub fn embed(carrier: &[f64], bits: &[u8], params: EchoParams) -> Vec<f64> {
    let window = params.window_len();
    debug_assert!(bits.len() * window <= carrier.len());

    let mut out = carrier.to_vec();
    for (i, &bit) in bits.iter().enumerate() {
        let start = i * window;
        let delay = if bit == 1 {
            params.delay_long
        } else {
            params.delay_short
        };
        for j in delay..window {
            out[start + j] += carrier[start + j - delay] * params.decay;
        }
    }
    out
}

/// Decide one window's bit from its autocorrelation peaks.
pub fn detect_bit(window: &[f64], params: EchoParams) -> u8 {
    let short = autocorrelation(window, params.delay_short);
    let long = autocorrelation(window, params.delay_long);
    u8::from(long > short)
}

/// Raw (unnormalized) autocorrelation of a window at one lag.
fn autocorrelation(window: &[f64], lag: usize) -> f64 {
    if lag >= window.len() {
        return 0.0;
    }
    window[lag..]
        .iter()
        .zip(window)
        .map(|(&a, &b)| a * b)
        .sum()
}
