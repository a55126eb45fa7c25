//! End-of-message marker framing.
//!
//! A message is byte-expanded and terminated with the byte expansion of a
//! fixed marker string. Decoding scans the bitstream for the first
//! suffix-aligned occurrence of the marker pattern using a KMP automaton,
//! so a full decode stays linear in carrier length instead of rescanning a
//! growing prefix after every bit.
//!
//! Known framing risk (by contract, not silently fixed): a payload whose own
//! bit expansion contains the marker pattern at a byte-aligned position
//! truncates decoding early.

use crate::error::{Error, Result};
use crate::framing::{bits_to_bytes, bytes_to_bits};

/// Frames messages with a configurable end marker.
///
/// The marker is caller-supplied configuration; different technique families
/// use different markers and both sides must agree on it.
#[derive(Debug, Clone)]
pub struct Framer {
    marker_bits: Vec<u8>,
    failure: Vec<usize>,
}

impl Framer {
    /// Build a framer for the given marker bytes.
    pub fn new(marker: &[u8]) -> Self {
        assert!(!marker.is_empty(), "marker must not be empty");
        let marker_bits = bytes_to_bits(marker);
        let failure = kmp_failure(&marker_bits);
        Self {
            marker_bits,
            failure,
        }
    }

    /// Number of bits the marker adds to every framed message.
    pub fn marker_len(&self) -> usize {
        self.marker_bits.len()
    }

    /// Total framed length in bits for a message of `message_len` bytes.
    pub fn framed_len(&self, message_len: usize) -> usize {
        message_len * 8 + self.marker_bits.len()
    }

    /// Expand a message into a terminated bitstream.
    pub fn encode(&self, message: &[u8]) -> Vec<u8> {
        let mut bits = bytes_to_bits(message);
        bits.extend_from_slice(&self.marker_bits);
        bits
    }

    /// Scan a bitstream for the marker and return the payload before it.
    ///
    /// Returns [`Error::DelimiterNotFound`] when the input is exhausted
    /// without a match, and [`Error::MalformedPayload`] when the prefix
    /// before the marker is not byte-aligned.
    pub fn decode(&self, bits: &[u8]) -> Result<Vec<u8>> {
        let mut scanner = self.scanner();
        for (i, &bit) in bits.iter().enumerate() {
            if scanner.push(bit) {
                let payload_bits = i + 1 - self.marker_bits.len();
                return bits_to_bytes(&bits[..payload_bits]);
            }
        }
        Err(Error::DelimiterNotFound)
    }

    /// Start an incremental marker scan for streaming decoders.
    pub fn scanner(&self) -> MarkerScanner<'_> {
        MarkerScanner {
            framer: self,
            state: 0,
        }
    }
}

/// Incremental KMP matcher over the marker bit pattern.
///
/// Feed bits one at a time; `push` reports when the bits seen so far end in
/// the complete marker.
#[derive(Debug)]
pub struct MarkerScanner<'a> {
    framer: &'a Framer,
    state: usize,
}

impl MarkerScanner<'_> {
    /// Advance the automaton by one bit. Returns true on a full match.
    pub fn push(&mut self, bit: u8) -> bool {
        let pattern = &self.framer.marker_bits;
        while self.state > 0 && pattern[self.state] != bit {
            self.state = self.framer.failure[self.state - 1];
        }
        if pattern[self.state] == bit {
            self.state += 1;
        }
        if self.state == pattern.len() {
            self.state = 0;
            true
        } else {
            false
        }
    }
}

/// Classic KMP failure function over the marker bits.
fn kmp_failure(pattern: &[u8]) -> Vec<usize> {
    let mut failure = vec![0usize; pattern.len()];
    let mut k = 0;
    for i in 1..pattern.len() {
        while k > 0 && pattern[k] != pattern[i] {
            k = failure[k - 1];
        }
        if pattern[k] == pattern[i] {
            k += 1;
        }
        failure[i] = k;
    }
    failure
}
