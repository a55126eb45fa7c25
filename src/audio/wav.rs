//! WAV container reading and writing.
//!
//! Only linear 16-bit integer PCM is accepted; sample rate, channel count,
//! and bit depth pass through the container unchanged, with only the sample
//! payload rewritten.

use crate::audio::SampleBuffer;
use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Read a carrier WAV into a [`SampleBuffer`].
pub fn read(path: &Path) -> Result<SampleBuffer> {
    if !path.exists() {
        return Err(Error::CarrierNotFound(path.to_path_buf()));
    }

    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::UnsupportedFormat(format!(
            "{:?} with {} bits per sample (need 16-bit integer PCM)",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, _>>()?;

    log::debug!(
        "read {}: {} samples, {} Hz, {} channel(s)",
        path.display(),
        samples.len(),
        spec.sample_rate,
        spec.channels
    );

    Ok(SampleBuffer::new(samples, spec.sample_rate, spec.channels))
}

/// Write a [`SampleBuffer`] as a 16-bit PCM WAV.
pub fn write(path: &Path, buffer: &SampleBuffer) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    log::debug!("wrote {}: {} samples", path.display(), buffer.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth;
    use tempfile::TempDir;

    #[test]
    fn test_write_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("carrier.wav");

        let original = synth::tone(440.0, 0.1, 44_100, 0.5);
        write(&path, &original).unwrap();
        let restored = read(&path).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_missing_carrier() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.wav");
        assert!(matches!(read(&path), Err(Error::CarrierNotFound(_))));
    }
}
