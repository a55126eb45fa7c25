//! Rescaling float working buffers back to integer PCM.

use crate::config::PCM_MAX_MAGNITUDE;

/// Rescale an entire float buffer into the 16-bit sample range.
///
/// Every sample is scaled by `PCM_MAX / max(|buffer|)` before quantizing.
/// The rescale is global, not per-segment: a loud passage anywhere in the
/// buffer lowers the effective amplitude of the embedded region. That is a
/// known fidelity/capacity trade-off of the whole-buffer approach, inherited
/// deliberately rather than compensated per block.
pub fn to_pcm(buffer: &[f64]) -> Vec<i16> {
    let peak = buffer.iter().fold(0.0f64, |m, &v| m.max(v.abs()));
    if peak == 0.0 {
        return vec![0; buffer.len()];
    }

    let scale = PCM_MAX_MAGNITUDE / peak;
    buffer
        .iter()
        .map(|&v| (v * scale).round().clamp(-PCM_MAX_MAGNITUDE, PCM_MAX_MAGNITUDE) as i16)
        .collect()
}
