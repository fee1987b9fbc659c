//! Input validation guards.
//!
//! Alpha-aware operations only make sense on 4-band RGBA images, and
//! two-image operations need inputs that line up sample for sample. These
//! checks run before any raster work so a bad input fails fast with a
//! precise error instead of a generic primitive failure.
//!
//! # Example
//!
//! ```rust
//! use comp_core::Image;
//! use comp_ops::guard::{ensure_rgba, ensure_same_shape};
//!
//! let rgba = Image::from_u8(1, 1, 4, vec![0, 0, 0, 255]).unwrap();
//! let rgb = Image::from_u8(1, 1, 3, vec![0, 0, 0]).unwrap();
//!
//! assert!(ensure_rgba(&rgba, "premultiply").is_ok());
//! assert!(ensure_rgba(&rgb, "premultiply").is_err());
//! assert!(ensure_same_shape(&rgba, &rgb).is_err());
//! ```

use crate::{OpsError, OpsResult};
use comp_core::Image;

/// Required band count for alpha-aware operations.
pub const RGBA_BANDS: u32 = 4;

/// Fails with [`OpsError::InvalidBandCount`] unless `image` has 4 bands.
pub fn ensure_rgba(image: &Image, op: &'static str) -> OpsResult<()> {
    if image.bands() != RGBA_BANDS {
        return Err(OpsError::InvalidBandCount {
            op,
            expected: RGBA_BANDS,
            actual: image.bands(),
        });
    }
    Ok(())
}

/// Fails with [`OpsError::ShapeMismatch`] unless both images share width,
/// height, band count and format.
pub fn ensure_same_shape(a: &Image, b: &Image) -> OpsResult<()> {
    if a.bands() != b.bands() {
        return Err(OpsError::ShapeMismatch(format!(
            "band count {} vs {}",
            a.bands(),
            b.bands()
        )));
    }
    if a.format() != b.format() {
        return Err(OpsError::ShapeMismatch(format!(
            "format {} vs {}",
            a.format(),
            b.format()
        )));
    }
    ensure_same_size(a, b)
}

/// Fails with [`OpsError::ShapeMismatch`] unless both images share width
/// and height.
pub fn ensure_same_size(a: &Image, b: &Image) -> OpsResult<()> {
    if !a.same_size(b) {
        return Err(OpsError::ShapeMismatch(format!(
            "size {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }
    Ok(())
}
