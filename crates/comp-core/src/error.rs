//! Error types for comp-core.
//!
//! Construction of an [`Image`](crate::Image) is the only fallible operation
//! at this level; everything that combines images lives in `comp-raster`
//! and `comp-ops` and wraps this error.
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or inspecting images.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width, height or band count is zero, or the sample
    /// count would overflow `usize`.
    #[error("invalid dimensions: {width}x{height}x{bands} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested band count
        bands: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Sample buffer length does not match the declared shape.
    #[error("data length mismatch: expected {expected} samples, got {got}")]
    DataLength {
        /// Samples implied by width * height * bands
        expected: usize,
        /// Samples actually supplied
        got: usize,
    },

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, bands: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            bands,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }
}
