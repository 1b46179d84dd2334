//! Single-error-correcting, double-error-detecting (72, 64) block coding of byte
//! messages.
//!
//! Messages of any length are coded in groups of up to 8 bytes, each followed by a
//! check byte, and decoded with single bit correction and double bit detection in every
//! group.

pub mod coding;
pub mod consts;
pub mod error;
pub mod message;
pub mod scheme;
pub mod stats;

mod util;

pub use crate::coding::secded::Status;
pub use crate::error::{FecError, Result};
pub use crate::message::{
    dec_length, decode, decode_into, decode_with, enc_length, encode, encode_into,
    DecodeOptions, Decoded,
};
pub use crate::scheme::Scheme;
pub use crate::stats::DecodeStats;
