//! Bitstream framing: byte/bit expansion, the end-of-message marker, and
//! capacity validation.

mod bitstream;
mod capacity;
mod framer;

pub use bitstream::{bits_to_bytes, bytes_to_bits};
pub use capacity::{check, CapacityReport};
pub use framer::{Framer, MarkerScanner};
