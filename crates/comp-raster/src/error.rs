//! Error types for raster operations.

use thiserror::Error;

/// Error type for primitive raster operations.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Operands have different pixel dimensions.
    #[error("{op}: size mismatch {a_width}x{a_height} vs {b_width}x{b_height}")]
    SizeMismatch {
        /// Operation name.
        op: &'static str,
        /// First operand width.
        a_width: u32,
        /// First operand height.
        a_height: u32,
        /// Second operand width.
        b_width: u32,
        /// Second operand height.
        b_height: u32,
    },

    /// Band counts can't be combined (neither equal nor one of them 1).
    #[error("{op}: band mismatch {a} vs {b}")]
    BandMismatch {
        /// Operation name.
        op: &'static str,
        /// First operand bands.
        a: u32,
        /// Second operand bands.
        b: u32,
    },

    /// Requested bands are outside the image.
    #[error("extract_band: bands {start}..{end} out of range for {bands}-band image")]
    BandRange {
        /// First requested band.
        start: u32,
        /// One past the last requested band.
        end: u32,
        /// Bands in the image.
        bands: u32,
    },

    /// Transform matrix can't be inverted or has non-finite entries.
    #[error("invalid transform matrix: {0}")]
    InvalidMatrix(String),

    /// Thread pool or other engine setup failed.
    #[error("engine initialization failed: {0}")]
    EngineInit(String),

    /// Building the result image failed.
    #[error(transparent)]
    Core(#[from] comp_core::Error),
}

impl RasterError {
    /// Creates a [`RasterError::SizeMismatch`] from two dimension pairs.
    #[inline]
    pub fn size_mismatch(op: &'static str, a: (u32, u32), b: (u32, u32)) -> Self {
        Self::SizeMismatch {
            op,
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }
}

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;
