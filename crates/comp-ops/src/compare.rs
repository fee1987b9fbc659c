//! Pixel-wise image comparison.
//!
//! - [`compare_mse`] - Mean squared error over every sample
//! - [`compare_std_dev`] - Standard deviation of the difference image
//! - [`compare_premultiplied`] - MSE after premultiplying both inputs, so
//!   color under fully transparent pixels does not count
//! - [`compare`] - MSE plus an exact-equality flag
//!
//! Inputs must agree in width, height, band count and format.
//!
//! # Example
//!
//! ```rust
//! use comp_core::Image;
//! use comp_ops::compare::compare;
//! use comp_raster::{Engine, EngineConfig};
//!
//! let engine = Engine::init(EngineConfig::default()).unwrap();
//! let a = Image::from_u8(1, 1, 4, vec![10, 20, 30, 255]).unwrap();
//! let b = Image::from_u8(1, 1, 4, vec![20, 20, 30, 255]).unwrap();
//!
//! let same = compare(&engine, &a, &a).unwrap();
//! assert!(same.is_equal);
//!
//! let diff = compare(&engine, &a, &b).unwrap();
//! assert_eq!(diff.mean_squared_error, 25.0);
//! assert!(!diff.is_equal);
//! ```

use crate::alpha::premultiply;
use crate::guard::{ensure_rgba, ensure_same_shape};
use crate::OpsResult;
use comp_core::Image;
use comp_raster::{RasterOps, Scope};
use std::fmt;
use tracing::debug;

/// Result of [`compare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// Mean of the squared per-sample differences.
    pub mean_squared_error: f64,
    /// `mean_squared_error == 0.0`, no tolerance.
    pub is_equal: bool,
}

impl Comparison {
    /// Builds a comparison from an MSE value.
    pub fn from_mse(mean_squared_error: f64) -> Self {
        Self {
            mean_squared_error,
            is_equal: mean_squared_error == 0.0,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_equal {
            write!(f, "identical (MSE 0)")
        } else {
            write!(f, "different (MSE {:.6})", self.mean_squared_error)
        }
    }
}

/// Mean squared error between `actual` and `expected`.
///
/// `sum((expected - actual)^2) / (width * height * bands)`
pub fn compare_mse<R: RasterOps + ?Sized>(
    ops: &R,
    actual: &Image,
    expected: &Image,
) -> OpsResult<f64> {
    ensure_same_shape(actual, expected)?;
    debug!(
        width = actual.width(),
        height = actual.height(),
        bands = actual.bands(),
        "compare_mse"
    );

    let mut scope = Scope::new(ops, "compare_mse");
    let diff = scope.subtract(expected, actual)?;
    let magnitude = scope.abs(&diff)?;
    let stats = scope.stats(&magnitude)?;
    Ok(stats.overall().sum_of_squares / actual.sample_count() as f64)
}

/// Sample standard deviation of `actual - expected`.
pub fn compare_std_dev<R: RasterOps + ?Sized>(
    ops: &R,
    actual: &Image,
    expected: &Image,
) -> OpsResult<f64> {
    ensure_same_shape(actual, expected)?;
    debug!(width = actual.width(), height = actual.height(), "compare_std_dev");

    let mut scope = Scope::new(ops, "compare_std_dev");
    let diff = scope.subtract(actual, expected)?;
    Ok(scope.deviate(&diff)?)
}

/// MSE between the premultiplied forms of two RGBA images.
pub fn compare_premultiplied<R: RasterOps + ?Sized>(
    ops: &R,
    actual: &Image,
    expected: &Image,
) -> OpsResult<f64> {
    ensure_rgba(actual, "compare_premultiplied")?;
    ensure_rgba(expected, "compare_premultiplied")?;
    ensure_same_shape(actual, expected)?;

    let actual = premultiply(ops, actual)?;
    let expected = premultiply(ops, expected)?;
    compare_mse(ops, &actual, &expected)
}

/// [`compare_mse`] wrapped in a [`Comparison`].
pub fn compare<R: RasterOps + ?Sized>(
    ops: &R,
    actual: &Image,
    expected: &Image,
) -> OpsResult<Comparison> {
    compare_mse(ops, actual, expected).map(Comparison::from_mse)
}
