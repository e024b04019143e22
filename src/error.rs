//! Error types shared across the crate.

use thiserror::Error;

/// A specialized `Result` type for autoencoder operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Two operands with incompatible shapes were passed to a matrix
    /// operation, or a vector's length disagrees with a configured layer
    /// size. Shapes are given as `(rows, cols)`.
    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a bitmap we can parse.
    #[error("invalid bitmap: {0}")]
    InvalidBitmap(String),

    /// Only 8, 24 and 32 bits per pixel are supported.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// A feature vector cannot be packed into pixels of the requested format.
    #[error("vector length {len} is not a multiple of {channels} channels")]
    BadVectorLength { len: usize, channels: usize },
}
