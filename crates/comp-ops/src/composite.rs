//! Porter-Duff "over" compositing.
//!
//! - [`composite`] - Premultiplied source over premultiplied destination
//! - [`composite_straight`] - The same blend computed in straight alpha
//! - [`overlay`] - Straight in, straight out: premultiply, composite,
//!   unpremultiply
//! - [`overlay_layers`] - Stack any number of layers onto a base
//!
//! With `sa`, `da` the alpha fractions (`alpha / max_alpha`):
//!
//! ```text
//! out_a   = sa + da * (1 - sa)
//! out_rgb = src_rgb + dst_rgb * (1 - sa)      (premultiplied)
//! out_A   = out_a * max_alpha
//! ```
//!
//! `max_alpha` is 65535 for `U16` inputs and 255 otherwise; see
//! [`BandFormat::max_alpha`](comp_core::BandFormat::max_alpha).
//!
//! # Example
//!
//! ```rust
//! use comp_core::{BandFormat, Image};
//! use comp_ops::composite::overlay;
//! use comp_raster::{Engine, EngineConfig, RasterOps};
//!
//! let engine = Engine::init(EngineConfig::default()).unwrap();
//! let red = Image::filled(2, 2, BandFormat::U8, &[255.0, 0.0, 0.0, 255.0]).unwrap();
//! let blue = Image::filled(2, 2, BandFormat::U8, &[0.0, 0.0, 255.0, 255.0]).unwrap();
//!
//! let out = overlay(&engine, &red, &blue).unwrap();
//! let out = engine.cast(&out, BandFormat::U8).unwrap();
//! assert_eq!(out, red);
//! ```

use crate::alpha::{
    ZeroAlpha, check_max_alpha, premultiply_with_max, shared_max_alpha, unpremultiply_with_max,
};
use crate::guard::{ensure_rgba, ensure_same_size};
use crate::{OpsError, OpsResult};
use comp_core::{ALPHA_BAND, COLOR_BANDS, Image};
use comp_raster::{RasterOps, RasterResult, Scope};
use tracing::debug;

/// Composites premultiplied `src` over premultiplied `dst`.
///
/// Both images need 4 bands and the same size. The output is premultiplied
/// (`F32` for integer inputs).
///
/// # Errors
///
/// - [`OpsError::InvalidBandCount`] / [`OpsError::ShapeMismatch`] for bad
///   inputs
/// - [`OpsError::InvalidParameter`] when the formats imply different alpha
///   ranges
/// - [`OpsError::CompositeFailed`] if a raster step fails
pub fn composite<R: RasterOps + ?Sized>(ops: &R, src: &Image, dst: &Image) -> OpsResult<Image> {
    check_pair(src, dst, "composite")?;
    let max_alpha = shared_max_alpha(src.format(), dst.format())?;
    composite_with_max(ops, src, dst, max_alpha)
}

/// [`composite`] with alpha running from 0 to `max_alpha`.
pub fn composite_with_max<R: RasterOps + ?Sized>(
    ops: &R,
    src: &Image,
    dst: &Image,
    max_alpha: f64,
) -> OpsResult<Image> {
    check_pair(src, dst, "composite")?;
    check_max_alpha(max_alpha)?;
    debug!(width = src.width(), height = src.height(), max_alpha, "composite");
    over_premultiplied(ops, src, dst, max_alpha).map_err(OpsError::CompositeFailed)
}

/// Composites straight-alpha `src` over straight-alpha `dst` without
/// leaving straight space.
///
/// Color is blended with `if_then_else` weighted by the source alpha and
/// then divided by the output alpha. Agrees with [`overlay`] up to
/// rounding; fully transparent results get color 0.
pub fn composite_straight<R: RasterOps + ?Sized>(
    ops: &R,
    src: &Image,
    dst: &Image,
) -> OpsResult<Image> {
    check_pair(src, dst, "composite")?;
    let max_alpha = shared_max_alpha(src.format(), dst.format())?;
    composite_straight_with_max(ops, src, dst, max_alpha)
}

/// [`composite_straight`] with alpha running from 0 to `max_alpha`.
pub fn composite_straight_with_max<R: RasterOps + ?Sized>(
    ops: &R,
    src: &Image,
    dst: &Image,
    max_alpha: f64,
) -> OpsResult<Image> {
    check_pair(src, dst, "composite")?;
    check_max_alpha(max_alpha)?;
    debug!(width = src.width(), height = src.height(), max_alpha, "composite_straight");
    over_straight(ops, src, dst, max_alpha).map_err(OpsError::CompositeFailed)
}

/// Places straight-alpha `src` over straight-alpha `dst`.
///
/// Premultiplies both, runs [`composite`], and unpremultiplies the result
/// with [`ZeroAlpha::Zero`]. The result is `F32` with alpha in the range of
/// the inputs (0-65535 for `U16`).
///
/// # Errors
///
/// As [`composite`].
pub fn overlay<R: RasterOps + ?Sized>(ops: &R, src: &Image, dst: &Image) -> OpsResult<Image> {
    check_pair(src, dst, "overlay")?;
    let max_alpha = shared_max_alpha(src.format(), dst.format())?;
    overlay_with_max(ops, src, dst, max_alpha)
}

/// Overlays `layers` onto `base`, first layer lowest.
///
/// The alpha range is taken from `base`; every layer must agree with it.
/// An empty stack returns `base` unchanged.
pub fn overlay_layers<R: RasterOps + ?Sized>(
    ops: &R,
    base: &Image,
    layers: &[Image],
) -> OpsResult<Image> {
    let max_alpha = base.format().max_alpha();
    debug!(layers = layers.len(), max_alpha, "overlay_layers");
    layers.iter().try_fold(base.clone(), |acc, layer| {
        shared_max_alpha(layer.format(), base.format())?;
        overlay_with_max(ops, layer, &acc, max_alpha)
    })
}

fn overlay_with_max<R: RasterOps + ?Sized>(
    ops: &R,
    src: &Image,
    dst: &Image,
    max_alpha: f64,
) -> OpsResult<Image> {
    check_pair(src, dst, "overlay")?;
    let src = premultiply_with_max(ops, src, max_alpha)?;
    let dst = premultiply_with_max(ops, dst, max_alpha)?;
    let out = composite_with_max(ops, &src, &dst, max_alpha)?;
    unpremultiply_with_max(ops, &out, ZeroAlpha::Zero, max_alpha)
}

fn check_pair(src: &Image, dst: &Image, op: &'static str) -> OpsResult<()> {
    ensure_rgba(src, op)?;
    ensure_rgba(dst, op)?;
    ensure_same_size(src, dst)
}

/// Shared alpha terms of both formulations.
struct AlphaTerms {
    /// `1 - sa`
    t0: Image,
    /// `sa + da * (1 - sa)`
    out_a: Image,
    /// `da`
    da: Image,
}

fn alpha_terms<R: RasterOps + ?Sized>(
    scope: &mut Scope<'_, R>,
    src_alpha: &Image,
    dst_alpha: &Image,
    max_alpha: f64,
) -> RasterResult<AlphaTerms> {
    let sa = scope.linear(src_alpha, 1.0 / max_alpha, 0.0)?;
    let da = scope.linear(dst_alpha, 1.0 / max_alpha, 0.0)?;
    let t0 = scope.linear(&sa, -1.0, 1.0)?;
    let covered = scope.multiply(&da, &t0)?;
    let out_a = scope.add(&sa, &covered)?;
    Ok(AlphaTerms { t0, out_a, da })
}

fn over_premultiplied<R: RasterOps + ?Sized>(
    ops: &R,
    src: &Image,
    dst: &Image,
    max_alpha: f64,
) -> RasterResult<Image> {
    let mut scope = Scope::new(ops, "composite");
    let src_rgb = scope.extract_band(src, 0, COLOR_BANDS)?;
    let src_alpha = scope.extract_band(src, ALPHA_BAND, 1)?;
    let dst_rgb = scope.extract_band(dst, 0, COLOR_BANDS)?;
    let dst_alpha = scope.extract_band(dst, ALPHA_BAND, 1)?;

    let terms = alpha_terms(&mut scope, &src_alpha, &dst_alpha, max_alpha)?;
    let behind = scope.multiply(&dst_rgb, &terms.t0)?;
    let out_rgb = scope.add(&src_rgb, &behind)?;
    let out_alpha = scope.linear(&terms.out_a, max_alpha, 0.0)?;
    scope.band_join(&out_rgb, &out_alpha)
}

fn over_straight<R: RasterOps + ?Sized>(
    ops: &R,
    src: &Image,
    dst: &Image,
    max_alpha: f64,
) -> RasterResult<Image> {
    let mut scope = Scope::new(ops, "composite_straight");
    let src_rgb = scope.extract_band(src, 0, COLOR_BANDS)?;
    let src_alpha = scope.extract_band(src, ALPHA_BAND, 1)?;
    let dst_rgb = scope.extract_band(dst, 0, COLOR_BANDS)?;
    let dst_alpha = scope.extract_band(dst, ALPHA_BAND, 1)?;

    let terms = alpha_terms(&mut scope, &src_alpha, &dst_alpha, max_alpha)?;
    let dst_weighted = scope.multiply(&dst_rgb, &terms.da)?;
    // blend weights run 0-255 whatever the alpha range
    let weight = scope.linear(&src_alpha, 255.0 / max_alpha, 0.0)?;
    let blended = scope.if_then_else(&weight, &src_rgb, &dst_weighted, true)?;
    let out_rgb = scope.divide(&blended, &terms.out_a)?;
    let out_alpha = scope.linear(&terms.out_a, max_alpha, 0.0)?;
    scope.band_join(&out_rgb, &out_alpha)
}
