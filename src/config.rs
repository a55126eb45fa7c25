//! Configuration constants and types for the wav-stego engine.

use serde::{Deserialize, Serialize};

/// End-of-message marker for single-layer embedding.
pub const DEFAULT_MARKER: &[u8] = b"$#*";

/// End-of-message marker used by the layered pipeline's in-buffer pass.
pub const LAYER_MARKER: &[u8] = b"#####";

/// Default FFT block size for phase coding.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Default chip window length (samples per bit) for spread spectrum.
pub const DEFAULT_CHIP_SIZE: usize = 1000;

/// Spread-spectrum chip amplitude, relative to full scale.
pub const SPREAD_AMPLITUDE: f64 = 0.1;

/// Echo attenuation applied to the delayed copy.
pub const ECHO_DECAY: f64 = 0.5;

/// Echo delay for bit 0, in seconds (~1 ms).
pub const ECHO_DELAY_SHORT_SECS: f64 = 0.001;

/// Echo delay for bit 1, in seconds (~2 ms).
pub const ECHO_DELAY_LONG_SECS: f64 = 0.002;

/// Peak magnitude of a 16-bit PCM sample.
pub const PCM_MAX_MAGNITUDE: f64 = 32767.0;

/// AES-256-CBC cipher parameters.
pub mod cipher_params {
    /// Key length in bytes (256 bits).
    pub const KEY_LENGTH: usize = 32;

    /// IV length in bytes (one AES block).
    pub const IV_LENGTH: usize = 16;
}

/// Parameters for echo-hiding embedding.
///
/// Both delays and the decay must be supplied identically at decode time;
/// the technique is not self-describing in the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EchoParams {
    /// Delay in samples encoding bit 0.
    pub delay_short: usize,
    /// Delay in samples encoding bit 1.
    pub delay_long: usize,
    /// Attenuation applied to the delayed copy.
    pub decay: f64,
}

impl EchoParams {
    /// Derive the reference ~1 ms / ~2 ms delays from a carrier sample rate.
    pub fn from_sample_rate(sample_rate: u32) -> Self {
        Self {
            delay_short: (sample_rate as f64 * ECHO_DELAY_SHORT_SECS) as usize,
            delay_long: (sample_rate as f64 * ECHO_DELAY_LONG_SECS) as usize,
            decay: ECHO_DECAY,
        }
    }

    /// Samples per embedding window: one bit per window.
    pub fn window_len(&self) -> usize {
        2 * self.delay_short.max(self.delay_long)
    }

    /// Validate the parameter combination.
    pub fn validate(&self) -> Result<(), String> {
        if self.delay_short == 0 || self.delay_long == 0 {
            return Err("echo delays must be at least one sample".to_string());
        }
        if self.delay_short == self.delay_long {
            return Err("echo delays must differ to be distinguishable".to_string());
        }
        if !(0.0..=1.0).contains(&self.decay) || self.decay == 0.0 {
            return Err("echo decay must be in (0, 1]".to_string());
        }
        Ok(())
    }
}
