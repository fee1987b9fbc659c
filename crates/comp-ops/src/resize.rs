//! Alpha-aware resizing.
//!
//! Resampling straight-alpha RGBA lets the color of transparent pixels
//! bleed into their visible neighbours. [`resize`] with
//! `premultiply_first` avoids that by resampling in premultiplied space:
//!
//! ```text
//! premultiply -> affine([s 0; 0 s], kernel) -> unpremultiply
//! ```
//!
//! # Example
//!
//! ```rust
//! use comp_core::{BandFormat, Image};
//! use comp_ops::resize::resize;
//! use comp_raster::{Engine, EngineConfig, Kernel};
//!
//! let engine = Engine::init(EngineConfig::default()).unwrap();
//! let img = Image::filled(10, 4, BandFormat::U8, &[9.0, 9.0, 9.0, 255.0]).unwrap();
//!
//! let out = resize(&engine, &img, 0.5, Kernel::Bicubic, true).unwrap();
//! assert_eq!(out.dimensions(), (5, 2));
//! assert_eq!(out.format(), BandFormat::F32);
//! ```

use crate::alpha::{ZeroAlpha, premultiply_with_max, unpremultiply_with_max};
use crate::guard::ensure_rgba;
use crate::{OpsError, OpsResult};
use comp_core::Image;
use comp_raster::{Affine, Kernel, RasterOps};
use tracing::debug;

/// Output size of a uniform resize: `max(1, round(dim * scale))`.
pub fn output_size(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let dim = |d: u32| ((d as f64 * scale).round() as u32).max(1);
    (dim(width), dim(height))
}

/// Scales `image` by `scale` with `kernel`.
///
/// With `premultiply_first` the image must be RGBA; it is resampled in
/// premultiplied space and returned straight (`F32`, alpha kept in the
/// input's range). Otherwise the transform is applied directly and the
/// input format is kept.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] unless `scale` is finite and positive
/// - [`OpsError::InvalidBandCount`] with `premultiply_first` on a
///   non-RGBA image
/// - [`OpsError::ResizeFailed`] if any stage fails, including an output
///   too large to allocate
pub fn resize<R: RasterOps + ?Sized>(
    ops: &R,
    image: &Image,
    scale: f64,
    kernel: Kernel,
    premultiply_first: bool,
) -> OpsResult<Image> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "scale must be finite and > 0, got {scale}"
        )));
    }
    if premultiply_first {
        ensure_rgba(image, "resize")?;
    }
    let (out_w, out_h) = output_size(image.width(), image.height(), scale);
    debug!(
        from = ?image.dimensions(),
        to = ?(out_w, out_h),
        %kernel,
        premultiply_first,
        "resize"
    );

    let matrix = Affine::scale(scale);
    let staged = || -> OpsResult<Image> {
        if !premultiply_first {
            return Ok(ops.affine(image, &matrix, kernel)?);
        }
        let max_alpha = image.format().max_alpha();
        let pre = premultiply_with_max(ops, image, max_alpha)?;
        let scaled = ops.affine(&pre, &matrix, kernel)?;
        unpremultiply_with_max(ops, &scaled, ZeroAlpha::Zero, max_alpha)
    };
    staged().map_err(|e| OpsError::ResizeFailed(Box::new(e)))
}

/// [`resize`] with the kernel given by name (`"bilinear"`, `"cubic"`, ...).
///
/// # Errors
///
/// [`OpsError::UnknownKernel`] for unrecognized names, otherwise as
/// [`resize`].
pub fn resize_named<R: RasterOps + ?Sized>(
    ops: &R,
    image: &Image,
    scale: f64,
    kernel: &str,
    premultiply_first: bool,
) -> OpsResult<Image> {
    let kernel: Kernel = kernel.parse()?;
    resize(ops, image, scale, kernel, premultiply_first)
}
