//! Premultiplied alpha conversion.
//!
//! - [`premultiply`] - `[R*a, G*a, B*a, A]` with `a = A / max_alpha`
//! - [`unpremultiply`] - `[R/a, G/a, B/a, A]`, zero alpha per [`ZeroAlpha`]
//!
//! Both take a 4-band image whose alpha lives in the same domain as the
//! color bands. The opaque value comes from the input format
//! ([`BandFormat::max_alpha`]): 65535 for `U16`, 255 otherwise. Integer
//! inputs come back as `F32`, which loses that information, so code that
//! carries a 16-bit image through premultiplied space passes the range
//! explicitly with [`premultiply_with_max`] / [`unpremultiply_with_max`].
//!
//! # Example
//!
//! ```rust
//! use comp_core::{BandFormat, Image};
//! use comp_ops::alpha::{premultiply, unpremultiply, ZeroAlpha};
//! use comp_raster::{Engine, EngineConfig, RasterOps};
//!
//! let engine = Engine::init(EngineConfig::default()).unwrap();
//! let img = Image::from_u8(1, 1, 4, vec![200, 100, 50, 51]).unwrap();
//!
//! let pre = premultiply(&engine, &img).unwrap();
//! assert_eq!(pre.format(), BandFormat::F32);
//!
//! let back = unpremultiply(&engine, &pre, ZeroAlpha::Zero).unwrap();
//! let back = engine.cast(&back, BandFormat::U8).unwrap();
//! assert_eq!(back, img);
//! ```

use crate::guard::ensure_rgba;
use crate::{OpsError, OpsResult};
use comp_core::{ALPHA_BAND, BandFormat, COLOR_BANDS, Image};
use comp_raster::{RasterOps, Scope};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// What [`unpremultiply`] does with pixels whose alpha is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZeroAlpha {
    /// Color becomes 0 (`x / 0 = 0`).
    #[default]
    Zero,
    /// Color keeps its premultiplied value.
    Preserve,
    /// Fail with [`OpsError::DivisionByZeroAlpha`].
    Reject,
}

impl ZeroAlpha {
    /// Canonical lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            ZeroAlpha::Zero => "zero",
            ZeroAlpha::Preserve => "preserve",
            ZeroAlpha::Reject => "reject",
        }
    }
}

impl fmt::Display for ZeroAlpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZeroAlpha {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(ZeroAlpha::Zero),
            "preserve" | "keep" => Ok(ZeroAlpha::Preserve),
            "reject" | "error" => Ok(ZeroAlpha::Reject),
            _ => Err(OpsError::InvalidParameter(format!(
                "unknown zero-alpha policy '{s}' (expected zero, preserve or reject)"
            ))),
        }
    }
}

/// Scales the color bands of a straight-alpha RGBA image by its alpha.
///
/// # Errors
///
/// [`OpsError::InvalidBandCount`] unless the image has exactly 4 bands.
pub fn premultiply<R: RasterOps + ?Sized>(ops: &R, image: &Image) -> OpsResult<Image> {
    premultiply_with_max(ops, image, image.format().max_alpha())
}

/// [`premultiply`] with alpha running from 0 to `max_alpha`.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] unless `max_alpha` is finite and > 0
/// - [`OpsError::InvalidBandCount`] unless the image has exactly 4 bands
pub fn premultiply_with_max<R: RasterOps + ?Sized>(
    ops: &R,
    image: &Image,
    max_alpha: f64,
) -> OpsResult<Image> {
    ensure_rgba(image, "premultiply")?;
    check_max_alpha(max_alpha)?;
    debug!(width = image.width(), height = image.height(), max_alpha, "premultiply");

    let mut scope = Scope::new(ops, "premultiply");
    let color = scope.extract_band(image, 0, COLOR_BANDS)?;
    let alpha = scope.extract_band(image, ALPHA_BAND, 1)?;
    let fraction = scope.linear(&alpha, 1.0 / max_alpha, 0.0)?;
    let scaled = scope.multiply(&color, &fraction)?;
    Ok(scope.band_join(&scaled, &alpha)?)
}

/// Divides the color bands of a premultiplied RGBA image by its alpha.
///
/// # Errors
///
/// - [`OpsError::InvalidBandCount`] unless the image has exactly 4 bands
/// - [`OpsError::DivisionByZeroAlpha`] under [`ZeroAlpha::Reject`] when
///   any pixel is fully transparent
pub fn unpremultiply<R: RasterOps + ?Sized>(
    ops: &R,
    image: &Image,
    zero_alpha: ZeroAlpha,
) -> OpsResult<Image> {
    unpremultiply_with_max(ops, image, zero_alpha, image.format().max_alpha())
}

/// [`unpremultiply`] with alpha running from 0 to `max_alpha`.
///
/// # Errors
///
/// As [`unpremultiply`], plus [`OpsError::InvalidParameter`] unless
/// `max_alpha` is finite and > 0.
pub fn unpremultiply_with_max<R: RasterOps + ?Sized>(
    ops: &R,
    image: &Image,
    zero_alpha: ZeroAlpha,
    max_alpha: f64,
) -> OpsResult<Image> {
    ensure_rgba(image, "unpremultiply")?;
    check_max_alpha(max_alpha)?;
    debug!(
        width = image.width(),
        height = image.height(),
        %zero_alpha,
        max_alpha,
        "unpremultiply"
    );

    let mut scope = Scope::new(ops, "unpremultiply");
    let color = scope.extract_band(image, 0, COLOR_BANDS)?;
    let alpha = scope.extract_band(image, ALPHA_BAND, 1)?;

    if zero_alpha == ZeroAlpha::Reject {
        let stats = scope.stats(&alpha)?;
        if stats.overall().min == 0.0 {
            let count = alpha.samples().iter().filter(|&&a| a == 0.0).count();
            return Err(OpsError::DivisionByZeroAlpha { count });
        }
    }

    let fraction = scope.linear(&alpha, 1.0 / max_alpha, 0.0)?;
    let divided = scope.divide(&color, &fraction)?;
    let color = match zero_alpha {
        ZeroAlpha::Preserve => scope.if_then_else(&alpha, &divided, &color, false)?,
        ZeroAlpha::Zero | ZeroAlpha::Reject => divided,
    };
    Ok(scope.band_join(&color, &alpha)?)
}

/// Opaque alpha shared by two straight-alpha images.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] when their formats disagree on it, e.g.
/// an 8-bit layer over a 16-bit background.
pub fn shared_max_alpha(a: BandFormat, b: BandFormat) -> OpsResult<f64> {
    let (ma, mb) = (a.max_alpha(), b.max_alpha());
    if ma != mb {
        return Err(OpsError::InvalidParameter(format!(
            "alpha ranges differ: {a} (0-{ma}) vs {b} (0-{mb})"
        )));
    }
    Ok(ma)
}

pub(crate) fn check_max_alpha(max_alpha: f64) -> OpsResult<()> {
    if !max_alpha.is_finite() || max_alpha <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "max alpha must be finite and > 0, got {max_alpha}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use comp_raster::{Engine, EngineConfig};

    fn engine() -> Engine {
        Engine::init(EngineConfig { threads: 1 }).unwrap()
    }

    #[test]
    fn test_premultiply_values() {
        let e = engine();
        let img = Image::from_u8(1, 1, 4, vec![200, 100, 50, 51]).unwrap();
        let pre = premultiply(&e, &img).unwrap();
        let px = pre.pixel(0, 0);
        assert_relative_eq!(px[0], 40.0, epsilon = 1e-4);
        assert_relative_eq!(px[1], 20.0, epsilon = 1e-4);
        assert_relative_eq!(px[2], 10.0, epsilon = 1e-4);
        assert_eq!(px[3], 51.0);
    }

    #[test]
    fn test_premultiply_requires_four_bands() {
        let e = engine();
        let rgb = Image::from_u8(1, 1, 3, vec![1, 2, 3]).unwrap();
        assert!(matches!(
            premultiply(&e, &rgb),
            Err(OpsError::InvalidBandCount { expected: 4, actual: 3, .. })
        ));
        assert!(matches!(
            unpremultiply(&e, &rgb, ZeroAlpha::Zero),
            Err(OpsError::InvalidBandCount { actual: 3, .. })
        ));
    }

    #[test]
    fn test_zero_alpha_policies() {
        let e = engine();
        let pre = Image::from_f32(2, 1, 4, vec![10.0, 20.0, 30.0, 0.0, 50.0, 50.0, 50.0, 255.0])
            .unwrap();

        let zero = unpremultiply(&e, &pre, ZeroAlpha::Zero).unwrap();
        assert_eq!(zero.pixel(0, 0), &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(zero.pixel(1, 0), &[50.0, 50.0, 50.0, 255.0]);

        let keep = unpremultiply(&e, &pre, ZeroAlpha::Preserve).unwrap();
        assert_eq!(keep.pixel(0, 0), &[10.0, 20.0, 30.0, 0.0]);
        assert_eq!(keep.pixel(1, 0), &[50.0, 50.0, 50.0, 255.0]);

        let err = unpremultiply(&e, &pre, ZeroAlpha::Reject).unwrap_err();
        assert!(matches!(err, OpsError::DivisionByZeroAlpha { count: 1 }));
    }

    #[test]
    fn test_reject_passes_without_zero_alpha() {
        let e = engine();
        let pre = Image::from_f32(1, 1, 4, vec![1.0, 2.0, 3.0, 255.0]).unwrap();
        let out = unpremultiply(&e, &pre, ZeroAlpha::Reject).unwrap();
        assert_eq!(out.samples(), &[1.0, 2.0, 3.0, 255.0]);
    }

    #[test]
    fn test_round_trip_every_alpha() {
        let e = engine();
        let mut data = Vec::new();
        for a in 1..=255u8 {
            data.extend_from_slice(&[a.wrapping_mul(7), 255 - a, 128, a]);
        }
        let img = Image::from_u8(255, 1, 4, data).unwrap();
        let pre = premultiply(&e, &img).unwrap();
        let back = unpremultiply(&e, &pre, ZeroAlpha::Zero).unwrap();
        let back = e.cast(&back, BandFormat::U8).unwrap();
        for (a, b) in back.samples().iter().zip(img.samples()) {
            assert!((a - b).abs() <= 1.0, "{a} vs {b}");
        }
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Preserve".parse::<ZeroAlpha>().unwrap(), ZeroAlpha::Preserve);
        assert_eq!(ZeroAlpha::default().to_string(), "zero");
        assert!("maybe".parse::<ZeroAlpha>().is_err());
    }

    #[test]
    fn test_sixteen_bit_alpha_range() {
        let e = engine();
        let img = Image::from_u16(1, 1, 4, vec![40000, 40000, 40000, 32768]).unwrap();
        let pre = premultiply(&e, &img).unwrap();
        let px = pre.pixel(0, 0);
        assert_relative_eq!(px[0], 40000.0 * 32768.0 / 65535.0, epsilon = 0.05);
        assert_eq!(px[3], 32768.0);

        let back = unpremultiply_with_max(&e, &pre, ZeroAlpha::Zero, 65535.0).unwrap();
        let back = e.cast(&back, BandFormat::U16).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_max_alpha_validation() {
        let e = engine();
        let img = Image::from_u8(1, 1, 4, vec![1, 2, 3, 4]).unwrap();
        for max in [0.0, -255.0, f64::NAN] {
            assert!(matches!(
                premultiply_with_max(&e, &img, max),
                Err(OpsError::InvalidParameter(_))
            ));
        }
        assert_eq!(shared_max_alpha(BandFormat::U8, BandFormat::F32).unwrap(), 255.0);
        assert!(shared_max_alpha(BandFormat::U8, BandFormat::U16).is_err());
    }
}
