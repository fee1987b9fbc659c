//! Affine (geometric) resampling.
//!
//! [`affine`] maps every output pixel back into the source through the
//! inverse of a 2x2 matrix and samples the source with an interpolation
//! [`Kernel`].
//!
//! # Matrix Format
//!
//! ```text
//! [ a  b ]   x_out = a * x_in + b * y_in
//! [ c  d ]   y_out = c * x_in + d * y_in
//! ```
//!
//! Pixel centers are aligned: output pixel `(x, y)` samples the source at
//! `inverse(x + 0.5, y + 0.5) - 0.5`. Taps that fall outside the source are
//! clamped to the nearest edge pixel, and kernel weights are normalized so
//! a constant image stays constant.
//!
//! # Example
//!
//! ```rust
//! use comp_core::{BandFormat, Image};
//! use comp_raster::affine::{affine, Affine};
//! use comp_raster::Kernel;
//!
//! let src = Image::filled(4, 4, BandFormat::U8, &[10.0, 20.0, 30.0, 255.0]).unwrap();
//! let dst = affine(&src, &Affine::scale(0.5), Kernel::Bilinear).unwrap();
//! assert_eq!(dst.dimensions(), (2, 2));
//! assert_eq!(dst.pixel(0, 0), &[10.0, 20.0, 30.0, 255.0]);
//! ```

use crate::parallel::fill_rows;
use crate::{Kernel, RasterError, RasterResult};
use comp_core::Image;

/// 2x2 linear transform applied by [`affine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// Row 0, column 0.
    pub a: f64,
    /// Row 0, column 1.
    pub b: f64,
    /// Row 1, column 0.
    pub c: f64,
    /// Row 1, column 1.
    pub d: f64,
}

impl Affine {
    /// Identity transform.
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
    };

    /// Uniform scale.
    #[inline]
    pub fn scale(s: f64) -> Self {
        Self::scale_xy(s, s)
    }

    /// Independent horizontal and vertical scale.
    #[inline]
    pub fn scale_xy(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
        }
    }

    /// Determinant of the matrix.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
        })
    }

    /// Transforms a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.b * y, self.c * x + self.d * y)
    }

    fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.d.is_finite()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Largest output, in samples, [`affine`] will allocate (8 GiB of `f64`).
pub const MAX_OUTPUT_SAMPLES: usize = 1 << 30;

/// Resamples `src` through `matrix` using `kernel`.
///
/// The output covers the transformed bounds of the source: for a uniform
/// scale `s` that is `round(width * s)` x `round(height * s)`, at least 1x1.
/// The output keeps the source format.
///
/// # Errors
///
/// [`RasterError::InvalidMatrix`] for singular or non-finite matrices, and
/// for transforms whose output would exceed [`MAX_OUTPUT_SAMPLES`].
pub fn affine(src: &Image, matrix: &Affine, kernel: Kernel) -> RasterResult<Image> {
    if !matrix.is_finite() {
        return Err(RasterError::InvalidMatrix(format!("{matrix:?} has non-finite entries")));
    }
    let inv = matrix
        .inverse()
        .ok_or_else(|| RasterError::InvalidMatrix(format!("{matrix:?} is singular")))?;

    let (sw, sh) = src.dimensions();
    let (min_x, min_y, out_w, out_h) = output_bounds(matrix, sw, sh)?;

    let nb = src.bands() as usize;
    let len = (out_w as usize)
        .checked_mul(out_h as usize)
        .and_then(|n| n.checked_mul(nb))
        .filter(|&n| n <= MAX_OUTPUT_SAMPLES)
        .ok_or_else(|| {
            RasterError::InvalidMatrix(format!(
                "{matrix:?} maps {sw}x{sh} to {out_w}x{out_h}x{nb}, over {MAX_OUTPUT_SAMPLES} samples"
            ))
        })?;
    let samples = src.samples();
    let support = kernel.support();
    let max_x = sw as i64 - 1;
    let max_y = sh as i64 - 1;

    let mut data = vec![0.0f64; len];
    fill_rows(&mut data, out_w as usize * nb, |y, row| {
        let mut acc = vec![0.0f64; nb];
        let py = min_y + y as f64 + 0.5;
        for (x, px) in row.chunks_mut(nb).enumerate() {
            let (ux, uy) = inv.apply(min_x + x as f64 + 0.5, py);
            let (sx, sy) = (ux - 0.5, uy - 0.5);

            acc.iter_mut().for_each(|v| *v = 0.0);
            let mut wsum = 0.0f64;

            let y0 = (sy - support).ceil() as i64;
            let y1 = (sy + support).floor() as i64;
            let x0 = (sx - support).ceil() as i64;
            let x1 = (sx + support).floor() as i64;

            for ty in y0..=y1 {
                let wy = kernel.weight(ty as f64 - sy);
                if wy == 0.0 {
                    continue;
                }
                let cy = ty.clamp(0, max_y) as usize;
                for tx in x0..=x1 {
                    let w = kernel.weight(tx as f64 - sx) * wy;
                    if w == 0.0 {
                        continue;
                    }
                    let cx = tx.clamp(0, max_x) as usize;
                    let idx = (cy * sw as usize + cx) * nb;
                    for (c, a) in acc.iter_mut().enumerate() {
                        *a += samples[idx + c] * w;
                    }
                    wsum += w;
                }
            }

            if wsum.abs() > 1e-12 {
                for (o, a) in px.iter_mut().zip(&acc) {
                    *o = a / wsum;
                }
            }
        }
    });

    Ok(Image::from_samples(out_w, out_h, src.bands(), src.format(), data)?)
}

/// Bounding box of the transformed source: (min_x, min_y, width, height).
fn output_bounds(m: &Affine, w: u32, h: u32) -> RasterResult<(f64, f64, u32, u32)> {
    let (w, h) = (w as f64, h as f64);
    let corners = [m.apply(0.0, 0.0), m.apply(w, 0.0), m.apply(0.0, h), m.apply(w, h)];

    let min_x = corners.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let extent = |span: f64| -> RasterResult<u32> {
        let span = span.round();
        if span.is_nan() || span > u32::MAX as f64 {
            return Err(RasterError::InvalidMatrix(format!(
                "{m:?} maps {w}x{h} to an extent of {span}"
            )));
        }
        Ok((span as u32).max(1))
    };
    Ok((min_x, min_y, extent(max_x - min_x)?, extent(max_y - min_y)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use comp_core::BandFormat;

    fn gradient(w: u32, h: u32) -> Image {
        let data = (0..w * h).map(|i| (i * 10) as f64).collect();
        Image::from_samples(w, h, 1, BandFormat::F32, data).unwrap()
    }

    #[test]
    fn test_identity_preserves_pixels() {
        let src = gradient(5, 3);
        for k in Kernel::ALL {
            let dst = affine(&src, &Affine::IDENTITY, k).unwrap();
            assert_eq!(dst.dimensions(), (5, 3));
            for (a, b) in dst.samples().iter().zip(src.samples()) {
                assert_relative_eq!(*a, *b, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_oversized_output_rejected() {
        let src = gradient(2, 2);
        for s in [1e10, 1e5] {
            let err = affine(&src, &Affine::scale(s), Kernel::Nearest).unwrap_err();
            assert!(matches!(err, RasterError::InvalidMatrix(_)), "scale {s}");
        }
        let err = affine(&src, &Affine::scale_xy(1e9, 1.0), Kernel::Nearest).unwrap_err();
        assert!(matches!(err, RasterError::InvalidMatrix(_)));
    }

    #[test]
    fn test_output_size() {
        let src = gradient(5, 3);
        let up = affine(&src, &Affine::scale(2.0), Kernel::Nearest).unwrap();
        assert_eq!(up.dimensions(), (10, 6));
        let down = affine(&src, &Affine::scale(0.1), Kernel::Bilinear).unwrap();
        assert_eq!(down.dimensions(), (1, 1));
    }

    #[test]
    fn test_nearest_upscale_duplicates() {
        let src = Image::from_u8(2, 1, 1, vec![0, 100]).unwrap();
        let dst = affine(&src, &Affine::scale_xy(2.0, 1.0), Kernel::Nearest).unwrap();
        assert_eq!(dst.samples(), &[0.0, 0.0, 100.0, 100.0]);
    }

    #[test]
    fn test_bilinear_upscale_interpolates() {
        let src = Image::from_u8(2, 1, 1, vec![0, 100]).unwrap();
        let dst = affine(&src, &Affine::scale_xy(2.0, 1.0), Kernel::Bilinear).unwrap();
        // Source positions -0.25, 0.25, 0.75, 1.25 with edge clamping.
        assert_eq!(dst.samples(), &[0.0, 25.0, 75.0, 100.0]);
    }

    #[test]
    fn test_constant_image_stays_constant() {
        let src = Image::filled(7, 5, BandFormat::U8, &[42.0, 255.0]).unwrap();
        for k in Kernel::ALL {
            let dst = affine(&src, &Affine::scale(1.7), k).unwrap();
            assert!(dst.samples().chunks(2).all(|p| p == [42.0, 255.0]), "{k}");
        }
    }

    #[test]
    fn test_singular_matrix_rejected() {
        let src = gradient(2, 2);
        let err = affine(&src, &Affine::scale(0.0), Kernel::Bilinear).unwrap_err();
        assert!(matches!(err, RasterError::InvalidMatrix(_)));
        let err = affine(&src, &Affine::scale(f64::NAN), Kernel::Bilinear).unwrap_err();
        assert!(matches!(err, RasterError::InvalidMatrix(_)));
    }
}
