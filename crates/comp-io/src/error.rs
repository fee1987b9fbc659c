//! Error types for image I/O.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File extension is not a supported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Band count or bit depth the codec can't represent.
    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),

    /// Decoded data didn't form a valid image.
    #[error(transparent)]
    Image(#[from] comp_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
