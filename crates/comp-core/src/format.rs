//! Band (sample) formats and their promotion rules.
//!
//! Every [`Image`](crate::Image) carries a [`BandFormat`] describing the
//! numeric domain of its samples. Arithmetic between images produces a new
//! format following the promotion rules below, so that e.g. subtracting two
//! 8-bit images yields signed 16-bit differences instead of wrapping.
//!
//! # Promotion
//!
//! | op                      | `U8`  | `U16` | `I16` | `I32` | `F32` | `F64` |
//! |-------------------------|-------|-------|-------|-------|-------|-------|
//! | `add`, `multiply`       | `U16` | `I32` | `I32` | `I32` | `F32` | `F64` |
//! | `subtract`              | `I16` | `I32` | `I32` | `I32` | `F32` | `F64` |
//! | `divide`, `linear`      | `F32` | `F32` | `F32` | `F32` | `F32` | `F64` |
//!
//! Mixed operands are first brought to their [`common`](BandFormat::common)
//! format.
//!
//! # Usage
//!
//! ```rust
//! use comp_core::BandFormat;
//!
//! let diff = BandFormat::U8.promote_subtract(BandFormat::U8);
//! assert_eq!(diff, BandFormat::I16);
//! assert_eq!(BandFormat::U8.normalize(300.4), 255.0);
//! ```

use std::fmt;

/// Numeric type of the samples of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BandFormat {
    /// 8-bit unsigned integer [0, 255].
    #[default]
    U8,
    /// 16-bit unsigned integer [0, 65535].
    U16,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 32-bit float.
    F32,
    /// 64-bit float, used for statistics and accumulators.
    F64,
}

impl BandFormat {
    /// Whether this is a floating-point format.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Whether this is an integer format.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !self.is_float()
    }

    /// Whether negative values are representable.
    #[inline]
    pub const fn is_signed(&self) -> bool {
        !matches!(self, Self::U8 | Self::U16)
    }

    /// Number of bits per sample.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 | Self::I16 => 16,
            Self::I32 | Self::F32 => 32,
            Self::F64 => 64,
        }
    }

    /// Smallest representable value.
    #[inline]
    pub fn min_value(&self) -> f64 {
        match self {
            Self::U8 | Self::U16 => 0.0,
            Self::I16 => i16::MIN as f64,
            Self::I32 => i32::MIN as f64,
            Self::F32 => f32::MIN as f64,
            Self::F64 => f64::MIN,
        }
    }

    /// Largest representable value.
    #[inline]
    pub fn max_value(&self) -> f64 {
        match self {
            Self::U8 => u8::MAX as f64,
            Self::U16 => u16::MAX as f64,
            Self::I16 => i16::MAX as f64,
            Self::I32 => i32::MAX as f64,
            Self::F32 => f32::MAX as f64,
            Self::F64 => f64::MAX,
        }
    }

    /// Alpha value meaning fully opaque.
    ///
    /// 65535 for `U16`, 255 for every other format. Float images carry
    /// alpha in the 8-bit domain unless told otherwise.
    #[inline]
    pub const fn max_alpha(&self) -> f64 {
        match self {
            Self::U16 => 65535.0,
            _ => 255.0,
        }
    }

    /// Brings a value into this format's domain.
    ///
    /// Integer formats round to nearest and saturate; NaN becomes 0.
    /// `F32` rounds to single precision.
    #[inline]
    pub fn normalize(&self, v: f64) -> f64 {
        match self {
            Self::F64 => v,
            Self::F32 => v as f32 as f64,
            _ => {
                if v.is_nan() {
                    0.0
                } else {
                    v.round().clamp(self.min_value(), self.max_value())
                }
            }
        }
    }

    /// Rank used to pick the wider of two integer formats.
    #[inline]
    const fn rank(&self) -> u8 {
        match self {
            Self::U8 => 0,
            Self::U16 => 1,
            Self::I16 => 1,
            Self::I32 => 2,
            Self::F32 => 3,
            Self::F64 => 4,
        }
    }

    /// Smallest format that represents every value of both formats.
    pub fn common(self, other: Self) -> Self {
        if self == other {
            return self;
        }
        if self == Self::F64 || other == Self::F64 {
            return Self::F64;
        }
        if self.is_float() || other.is_float() {
            return Self::F32;
        }
        match (self, other) {
            // Unsigned 16-bit and signed 16-bit only meet in 32-bit.
            (Self::U16, Self::I16) | (Self::I16, Self::U16) => Self::I32,
            (Self::U8, Self::I16) | (Self::I16, Self::U8) => Self::I16,
            _ => {
                if self.rank() >= other.rank() {
                    self
                } else {
                    other
                }
            }
        }
    }

    /// Result format of `self + other` (and `self * other`).
    pub fn promote_add(self, other: Self) -> Self {
        match self.common(other) {
            Self::U8 => Self::U16,
            Self::U16 | Self::I16 | Self::I32 => Self::I32,
            f => f,
        }
    }

    /// Result format of `self * other`.
    #[inline]
    pub fn promote_multiply(self, other: Self) -> Self {
        self.promote_add(other)
    }

    /// Result format of `self - other`.
    pub fn promote_subtract(self, other: Self) -> Self {
        match self.common(other) {
            Self::U8 => Self::I16,
            Self::U16 | Self::I16 | Self::I32 => Self::I32,
            f => f,
        }
    }

    /// Result format of `self / other`.
    #[inline]
    pub fn promote_divide(self, other: Self) -> Self {
        self.common(other).to_float()
    }

    /// Float format used when a value of this format is scaled.
    #[inline]
    pub fn to_float(self) -> Self {
        if self == Self::F64 { Self::F64 } else { Self::F32 }
    }

    /// Short lowercase name ("u8", "f32", ...).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for BandFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
