//! Encoding and decoding of the error correction codes applied to message symbols.

pub mod secded;
