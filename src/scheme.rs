//! Selection of the forward error correction scheme applied to a message.

use std::fmt;
use std::str::FromStr;

use crate::error::{FecError, Result};
use crate::message::{self, DecodeOptions, Decoded};
use crate::stats::DecodeStats;

/// Forward error correction schemes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(serde::Serialize))]
pub enum Scheme {
    /// No error correction: messages are passed through uncoded.
    None,
    /// (72, 64) SEC-DED block code, one check byte per 8 data bytes.
    Secded7264,
}

impl Scheme {
    /// All supported schemes.
    pub const ALL: &'static [Scheme] = &[Scheme::None, Scheme::Secded7264];

    /// Short name of the scheme.
    pub fn name(&self) -> &'static str {
        match *self {
            Scheme::None => "none",
            Scheme::Secded7264 => "secded7264",
        }
    }

    /// Nominal code rate as `(k, n)`, where every `k` message bytes are coded as `n`
    /// bytes.
    pub fn rate(&self) -> (usize, usize) {
        match *self {
            Scheme::None => (1, 1),
            Scheme::Secded7264 => (8, 9),
        }
    }

    /// Compute the encoded length of a message with the given length in bytes.
    pub fn enc_length(&self, len: usize) -> usize {
        match *self {
            Scheme::None => len,
            Scheme::Secded7264 => message::enc_length(len),
        }
    }

    /// Recover the original message length from the given encoded length.
    pub fn dec_length(&self, len: usize) -> Result<usize> {
        match *self {
            Scheme::None => Ok(len),
            Scheme::Secded7264 => message::dec_length(len),
        }
    }

    /// Encode the given message.
    pub fn encode(&self, msg: &[u8]) -> Vec<u8> {
        match *self {
            Scheme::None => msg.to_vec(),
            Scheme::Secded7264 => message::encode(msg),
        }
    }

    /// Decode the given encoded message, correcting errors where the scheme allows.
    pub fn decode(&self, enc: &[u8]) -> Result<Decoded> {
        self.decode_with(enc, DecodeOptions::default())
    }

    /// Decode the given encoded message using the given options.
    pub fn decode_with(&self, enc: &[u8], opts: DecodeOptions) -> Result<Decoded> {
        match *self {
            Scheme::None => Ok(Decoded {
                data: enc.to_vec(),
                stats: DecodeStats::default(),
            }),
            Scheme::Secded7264 => message::decode_with(enc, opts),
        }
    }
}

impl Default for Scheme {
    fn default() -> Self { Scheme::Secded7264 }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = FecError;

    fn from_str(s: &str) -> Result<Self> {
        Scheme::ALL.iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .cloned()
            .ok_or_else(|| FecError::UnknownScheme(s.to_string()))
    }
}
