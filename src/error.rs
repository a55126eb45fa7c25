//! Error types for the wav-stego engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wav-stego operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during embedding, extraction, or the surrounding
/// collaborator calls.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV container error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Carrier audio file not found.
    #[error("Carrier not found: {0}")]
    CarrierNotFound(PathBuf),

    /// Payload file not found.
    #[error("Payload not found: {0}")]
    PayloadNotFound(PathBuf),

    /// Carrier uses a sample format the codecs do not support.
    #[error("Unsupported carrier format: {0}")]
    UnsupportedFormat(String),

    /// The bitstream does not fit in the carrier's embedding slots.
    /// Checked before any mutation, never a partial write.
    #[error("Capacity exceeded: need {required} bits, carrier holds {available}")]
    CapacityExceeded { required: usize, available: usize },

    /// The entire carrier was scanned without finding the end marker.
    /// Signals "no hidden data or corrupted data".
    #[error("End marker not found: carrier holds no message or the data is corrupted")]
    DelimiterNotFound,

    /// The bit count before the end marker is not byte-aligned.
    #[error("Malformed payload: {bits} bits before the marker is not a whole number of bytes")]
    MalformedPayload { bits: usize },

    /// Encryption key is not the required length.
    #[error("Invalid key length: expected {expected} bytes, found {found}")]
    InvalidKeyLength { expected: usize, found: usize },

    /// Decryption error (wrong key or corrupted data).
    #[error("Decryption failed: wrong key or corrupted data")]
    Decryption,

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// External container tool binary is not installed or not on PATH.
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    /// External container tool exited with a failure.
    #[error("External tool failed (status {status}): {stderr}")]
    ToolFailed { status: i32, stderr: String },

    /// A technique or configuration parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
