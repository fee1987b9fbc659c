//! Error types for alpha, compositing, resize and comparison operations.

use comp_raster::{RasterError, UnknownKernel};
use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Input has the wrong number of bands.
    #[error("{op}: expected {expected} bands, got {actual}")]
    InvalidBandCount {
        /// Operation name.
        op: &'static str,
        /// Required band count.
        expected: u32,
        /// Band count of the input.
        actual: u32,
    },

    /// Inputs differ in size, band count or format.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A raster primitive failed.
    #[error("raster operation failed: {0}")]
    UnderlyingOpFailed(#[from] RasterError),

    /// Unpremultiply met zero alpha under [`ZeroAlpha::Reject`](crate::alpha::ZeroAlpha::Reject).
    #[error("division by zero alpha in {count} pixel(s)")]
    DivisionByZeroAlpha {
        /// Number of pixels with alpha 0.
        count: usize,
    },

    /// Compositing failed in the raster engine.
    #[error("composite failed")]
    CompositeFailed(#[source] RasterError),

    /// A resize stage failed.
    #[error("resize failed")]
    ResizeFailed(#[source] Box<OpsError>),

    /// Interpolation kernel name not recognized.
    #[error(transparent)]
    UnknownKernel(#[from] UnknownKernel),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
