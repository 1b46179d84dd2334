//! Standard errors that may occur when coding messages.

use thiserror::Error;

/// Message coding errors.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FecError {
    /// The encoded length would leave a trailing check byte with no data bytes.
    #[error("encoded length {0} leaves a check byte without data")]
    MalformedLength(usize),
    /// A caller-provided output buffer is too short to hold the result.
    #[error("output buffer holds {have} bytes but {need} are required")]
    BufferTooSmall { need: usize, have: usize },
    /// An unknown coding scheme name was given.
    #[error("unknown FEC scheme: {0}")]
    UnknownScheme(String),
}

/// Standard result using `FecError`.
pub type Result<T> = std::result::Result<T, FecError>;
