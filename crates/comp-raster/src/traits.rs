//! The raster operations contract.
//!
//! Higher-level operations (premultiply, composite, compare, ...) are
//! written against [`RasterOps`] rather than a concrete engine, so any
//! backend providing these primitives can drive them.

use crate::affine::Affine;
use crate::{Kernel, RasterResult};
use comp_core::{BandFormat, Image, StatsResult};

/// Primitive per-pixel raster operations.
///
/// Every method returns a new image and leaves its inputs untouched.
/// Binary operations require equal width and height; band counts must be
/// equal or one side must have a single band, which is broadcast.
pub trait RasterOps: Send + Sync {
    /// Copies `count` bands starting at `start`.
    fn extract_band(&self, src: &Image, start: u32, count: u32) -> RasterResult<Image>;

    /// Appends the bands of `b` after the bands of `a`.
    fn band_join(&self, a: &Image, b: &Image) -> RasterResult<Image>;

    /// `a + b`
    fn add(&self, a: &Image, b: &Image) -> RasterResult<Image>;

    /// `a - b`
    fn subtract(&self, a: &Image, b: &Image) -> RasterResult<Image>;

    /// `a * b`
    fn multiply(&self, a: &Image, b: &Image) -> RasterResult<Image>;

    /// `a / b`, with `x / 0 = 0`.
    fn divide(&self, a: &Image, b: &Image) -> RasterResult<Image>;

    /// `|v|`
    fn abs(&self, src: &Image) -> RasterResult<Image>;

    /// `v * scale + offset`
    fn linear(&self, src: &Image, scale: f64, offset: f64) -> RasterResult<Image>;

    /// Converts to `format`, rounding and saturating for integer targets.
    fn cast(&self, src: &Image, format: BandFormat) -> RasterResult<Image>;

    /// Resamples through `matrix` with `kernel`.
    fn affine(&self, src: &Image, matrix: &Affine, kernel: Kernel) -> RasterResult<Image>;

    /// Selects (or with `blend`, mixes) `then` and `else_` by `cond`.
    fn if_then_else(
        &self,
        cond: &Image,
        then: &Image,
        else_: &Image,
        blend: bool,
    ) -> RasterResult<Image>;

    /// Statistics table (aggregate row first, then one row per band).
    fn stats(&self, src: &Image) -> RasterResult<StatsResult>;

    /// Standard deviation over every sample.
    fn deviate(&self, src: &Image) -> RasterResult<f64> {
        Ok(self.stats(src)?.overall().stddev)
    }
}
