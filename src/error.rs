//! Error types returned by hashing.
//!
//! A call either yields a complete [`Hash`](crate::Hash) or fails with one of
//! the variants of [`BlockhashError`]. No retries happen inside the crate.

use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type Result<T> = std::result::Result<T, BlockhashError>;

/// Errors raised while decoding, reducing, thresholding or encoding.
#[derive(Error, Debug)]
pub enum BlockhashError {
    /// The image decoder failed, passed through verbatim. Covers unsupported
    /// or unregistered formats, corrupt data and read failures on the input
    /// stream.
    #[error(transparent)]
    Decode(#[from] image::ImageError),

    /// `bits` is not a power of two `>= 2`, the image is smaller than `bits`
    /// in one of its dimensions, or a matrix length violates a divisibility
    /// requirement.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A bit matrix cannot be encoded.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl BlockhashError {
    pub(crate) fn invalid_configuration(msg: impl Into<String>) -> Self {
        BlockhashError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        BlockhashError::InvalidInput(msg.into())
    }
}
