//! Interpolation kernels for affine resampling.
//!
//! # Kernels
//!
//! - [`Kernel::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Kernel::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Kernel::Bicubic`] - Catmull-Rom cubic (sharper, interpolating)
//! - [`Kernel::Lanczos3`] - Windowed sinc, best detail retention
//!
//! Kernels are resolved once from their name at the API boundary:
//!
//! ```rust
//! use comp_raster::Kernel;
//!
//! let k: Kernel = "bicubic".parse().unwrap();
//! assert_eq!(k, Kernel::Bicubic);
//! assert!("sinc".parse::<Kernel>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

/// Interpolation kernel used by [`affine`](crate::affine::affine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kernel {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Bicubic interpolation (Catmull-Rom).
    Bicubic,
    /// Lanczos-3.
    Lanczos3,
}

impl Kernel {
    /// All supported kernels.
    pub const ALL: [Kernel; 4] = [
        Kernel::Nearest,
        Kernel::Bilinear,
        Kernel::Bicubic,
        Kernel::Lanczos3,
    ];

    /// Returns the support radius for this kernel.
    #[inline]
    pub fn support(&self) -> f64 {
        match self {
            Kernel::Nearest => 0.5,
            Kernel::Bilinear => 1.0,
            Kernel::Bicubic => 2.0,
            Kernel::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the kernel at distance `x` from the sample point.
    #[inline]
    pub fn weight(&self, x: f64) -> f64 {
        match self {
            Kernel::Nearest => nearest_weight(x),
            Kernel::Bilinear => bilinear_weight(x),
            Kernel::Bicubic => catmull_rom_weight(x),
            Kernel::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Canonical lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Kernel::Nearest => "nearest",
            Kernel::Bilinear => "bilinear",
            Kernel::Bicubic => "bicubic",
            Kernel::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown kernel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKernel(pub String);

impl fmt::Display for UnknownKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown interpolation kernel '{}' (expected nearest, bilinear, bicubic or lanczos3)",
            self.0
        )
    }
}

impl std::error::Error for UnknownKernel {}

impl FromStr for Kernel {
    type Err = UnknownKernel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "nn" => Ok(Kernel::Nearest),
            "bilinear" | "linear" => Ok(Kernel::Bilinear),
            "bicubic" | "cubic" => Ok(Kernel::Bicubic),
            "lanczos3" | "lanczos" => Ok(Kernel::Lanczos3),
            _ => Err(UnknownKernel(s.to_string())),
        }
    }
}

/// Box weight, half-open so exactly one tap wins at a tie.
#[inline]
fn nearest_weight(x: f64) -> f64 {
    if (-0.5..0.5).contains(&x) { 1.0 } else { 0.0 }
}

/// Bilinear (triangle) weight function.
#[inline]
fn bilinear_weight(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Catmull-Rom cubic (B=0, C=0.5): passes through the samples.
#[inline]
fn catmull_rom_weight(x: f64) -> f64 {
    let ax = x.abs();
    if ax < 1.0 {
        1.5 * ax * ax * ax - 2.5 * ax * ax + 1.0
    } else if ax < 2.0 {
        -0.5 * ax * ax * ax + 2.5 * ax * ax - 4.0 * ax + 2.0
    } else {
        0.0
    }
}

/// Lanczos weight function.
#[inline]
fn lanczos_weight(x: f64, a: f64) -> f64 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f64::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}
