//! Immutable raster image handle.
//!
//! [`Image`] is the single image type of the workspace: a width x height grid
//! of pixels with `bands` interleaved samples each, tagged with a
//! [`BandFormat`]. Whether an RGBA image holds straight or premultiplied
//! color is a property of how it was produced, not of its type.
//!
//! # Memory Layout
//!
//! Samples are stored in **row-major** order, top-to-bottom, bands
//! interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//! ```
//!
//! Samples are held as `f64` and are always representable in the image's
//! format: integer formats are rounded and saturated on construction.
//!
//! # Ownership
//!
//! The sample buffer lives in an [`Arc`], so cloning an image is cheap and
//! never copies pixels. Images are never mutated after construction; every
//! operation produces a new one.
//!
//! # Usage
//!
//! ```rust
//! use comp_core::{BandFormat, Image};
//!
//! let red = Image::filled(2, 2, BandFormat::U8, &[255.0, 0.0, 0.0, 255.0]).unwrap();
//! assert_eq!(red.bands(), 4);
//! assert_eq!(red.pixel(1, 1), &[255.0, 0.0, 0.0, 255.0]);
//! ```

use crate::{BandFormat, Error, Result};
use std::fmt;
use std::sync::Arc;

/// Band index of alpha in an RGBA image.
pub const ALPHA_BAND: u32 = 3;

/// Number of color bands in an RGBA image.
pub const COLOR_BANDS: u32 = 3;

/// Immutable multi-band raster image.
#[derive(Clone)]
pub struct Image {
    data: Arc<Vec<f64>>,
    width: u32,
    height: u32,
    bands: u32,
    format: BandFormat,
}

impl Image {
    /// Creates an image from interleaved samples.
    ///
    /// Samples are normalized into `format` (rounded and saturated for
    /// integer formats).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero sizes and
    /// [`Error::DataLength`] if `data` doesn't hold `width * height * bands`
    /// samples.
    pub fn from_samples(
        width: u32,
        height: u32,
        bands: u32,
        format: BandFormat,
        mut data: Vec<f64>,
    ) -> Result<Self> {
        let expected = sample_count(width, height, bands)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                got: data.len(),
            });
        }
        if format != BandFormat::F64 {
            for v in data.iter_mut() {
                *v = format.normalize(*v);
            }
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            bands,
            format,
        })
    }

    /// Creates a `U8` image from interleaved bytes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use comp_core::{BandFormat, Image};
    ///
    /// let img = Image::from_u8(1, 1, 4, vec![10, 20, 30, 255]).unwrap();
    /// assert_eq!(img.format(), BandFormat::U8);
    /// ```
    pub fn from_u8(width: u32, height: u32, bands: u32, data: Vec<u8>) -> Result<Self> {
        let data = data.into_iter().map(f64::from).collect();
        Self::from_samples(width, height, bands, BandFormat::U8, data)
    }

    /// Creates a `U16` image from interleaved 16-bit samples.
    pub fn from_u16(width: u32, height: u32, bands: u32, data: Vec<u16>) -> Result<Self> {
        let data = data.into_iter().map(f64::from).collect();
        Self::from_samples(width, height, bands, BandFormat::U16, data)
    }

    /// Creates an `F32` image from interleaved float samples.
    pub fn from_f32(width: u32, height: u32, bands: u32, data: Vec<f32>) -> Result<Self> {
        let data = data.into_iter().map(f64::from).collect();
        Self::from_samples(width, height, bands, BandFormat::F32, data)
    }

    /// Creates an image with every pixel set to `pixel`.
    ///
    /// The band count is `pixel.len()`.
    pub fn filled(width: u32, height: u32, format: BandFormat, pixel: &[f64]) -> Result<Self> {
        let bands = pixel.len() as u32;
        let count = sample_count(width, height, bands)?;
        let mut data = Vec::with_capacity(count);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(pixel);
        }
        Self::from_samples(width, height, bands, format, data)
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of bands per pixel.
    #[inline]
    pub fn bands(&self) -> u32 {
        self.bands
    }

    /// Returns the sample format.
    #[inline]
    pub fn format(&self) -> BandFormat {
        self.format
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total number of samples (`pixels * bands`).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// Interleaved samples.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.data
    }

    /// True when both images have the same width and height.
    #[inline]
    pub fn same_size(&self, other: &Image) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// True for a 4-band image (RGB + alpha).
    #[inline]
    pub fn is_rgba(&self) -> bool {
        self.bands == COLOR_BANDS + 1
    }

    /// Samples of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image. Use [`get_pixel`](Self::get_pixel)
    /// for a checked variant.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f64] {
        let nb = self.bands as usize;
        let idx = (y as usize * self.width as usize + x as usize) * nb;
        &self.data[idx..idx + nb]
    }

    /// Checked version of [`pixel`](Self::pixel).
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<&[f64]> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.pixel(x, y))
    }

    /// Samples converted to bytes (rounded, saturated).
    pub fn to_u8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| BandFormat::U8.normalize(v) as u8)
            .collect()
    }

    /// Samples converted to 16-bit (rounded, saturated).
    pub fn to_u16(&self) -> Vec<u16> {
        self.data
            .iter()
            .map(|&v| BandFormat::U16.normalize(v) as u16)
            .collect()
    }

    /// Number of live handles sharing this image's samples.
    #[inline]
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bands", &self.bands)
            .field("format", &self.format)
            .finish()
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && self.bands == other.bands
            && self.format == other.format
            && self.data == other.data
    }
}

/// Validates a shape and returns its sample count.
fn sample_count(width: u32, height: u32, bands: u32) -> Result<usize> {
    if width == 0 || height == 0 || bands == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            bands,
            "width, height and bands must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(bands as usize))
        .ok_or_else(|| Error::invalid_dimensions(width, height, bands, "sample count overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8() {
        let img = Image::from_u8(2, 1, 4, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.pixel(1, 0), &[5.0, 6.0, 7.0, 8.0]);
        assert!(img.is_rgba());
    }

    #[test]
    fn test_length_mismatch() {
        let err = Image::from_u8(2, 2, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::DataLength { expected: 16, got: 15 }));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(Image::from_u8(0, 2, 4, vec![]).is_err());
        assert!(Image::filled(2, 2, BandFormat::U8, &[]).is_err());
    }

    #[test]
    fn test_samples_normalized() {
        let img = Image::from_samples(1, 1, 2, BandFormat::U8, vec![-4.0, 300.0]).unwrap();
        assert_eq!(img.samples(), &[0.0, 255.0]);
    }

    #[test]
    fn test_get_pixel_bounds() {
        let img = Image::filled(3, 2, BandFormat::U8, &[7.0]).unwrap();
        assert!(img.get_pixel(2, 1).is_ok());
        assert!(matches!(img.get_pixel(3, 0), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn test_clone_shares_samples() {
        let img = Image::filled(4, 4, BandFormat::F32, &[0.5; 4]).unwrap();
        assert_eq!(img.handle_count(), 1);
        let other = img.clone();
        assert_eq!(img.handle_count(), 2);
        drop(other);
        assert_eq!(img.handle_count(), 1);
    }

    #[test]
    fn test_to_u8_rounds() {
        let img = Image::from_f32(1, 1, 3, vec![0.4, 127.5, 999.0]).unwrap();
        assert_eq!(img.to_u8(), vec![0, 128, 255]);
    }
}
