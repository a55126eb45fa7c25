//! Multi-technique audio steganography engine.
//!
//! Embeds arbitrary byte payloads inside 16-bit PCM WAV carriers and recovers
//! them losslessly (or within a small bit-error budget for the detector-based
//! techniques) from the modified carrier.
//!
//! # Techniques
//!
//! - **LSB**: parametrized bit-plane substitution (bit 0–7)
//! - **Echo hiding**: short/long delayed echo per window
//! - **Phase coding**: FFT block phase of a fixed low-frequency bin
//! - **Spread spectrum**: seeded pseudorandom chip correlation
//!
//! # Architecture
//!
//! ```text
//! Embed:   samples → capacity check → Technique::encode → normalize → samples
//! Extract: samples → Technique::decode → Framer (end-marker scan) → message
//! ```
//!
//! # Example
//!
//! ```rust
//! use wav_stego::audio::synth;
//! use wav_stego::codec::Technique;
//! use wav_stego::config::DEFAULT_MARKER;
//! use wav_stego::framing::Framer;
//!
//! let carrier = synth::tone(440.0, 1.0, 44_100, 0.5);
//! let framer = Framer::new(DEFAULT_MARKER);
//! let technique = Technique::Lsb { bit_position: 0 };
//!
//! let stego = technique
//!     .encode(&carrier, &framer.encode(b"secret"))
//!     .unwrap();
//! let message = technique.decode(&stego, &framer).unwrap();
//! assert_eq!(message, b"secret");
//! ```

pub mod audio;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod external;
pub mod framing;
pub mod pipeline;

pub use codec::Technique;
pub use error::{Error, Result};
pub use framing::Framer;
