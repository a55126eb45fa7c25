//! Carrier audio: sample buffers, WAV container I/O, demo-carrier synthesis,
//! normalization, and signal-quality measurement.

mod buffer;
mod metrics;
mod normalize;
pub mod synth;
mod wav;

pub use buffer::SampleBuffer;
pub use metrics::{measure, QualityReport};
pub use normalize::to_pcm;
pub use wav::{read, write};
