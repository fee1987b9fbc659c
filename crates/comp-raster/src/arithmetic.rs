//! Pixel-wise arithmetic.
//!
//! This module provides the elementwise operations:
//! - [`add`] / [`subtract`] / [`multiply`] / [`divide`] - Binary arithmetic
//! - [`abs`] - Absolute value
//! - [`linear`] - `v * scale + offset`
//! - [`cast`] - Convert to another band format
//!
//! Binary operands must share width and height. Band counts must be equal,
//! or one operand has a single band which is applied to every band of the
//! other (an RGB image times a one-band alpha image gives RGB).
//!
//! Output formats follow [`BandFormat`] promotion; see `comp_core::format`.

use crate::parallel::fill_rows;
use crate::{RasterError, RasterResult};
use comp_core::{BandFormat, Image};

/// Adds two images pixel-wise: `a + b`.
pub fn add(a: &Image, b: &Image) -> RasterResult<Image> {
    let format = a.format().promote_add(b.format());
    binary("add", a, b, format, |x, y| x + y)
}

/// Subtracts two images pixel-wise: `a - b`.
///
/// Unsigned inputs produce a signed result (`U8 - U8` is `I16`).
pub fn subtract(a: &Image, b: &Image) -> RasterResult<Image> {
    let format = a.format().promote_subtract(b.format());
    binary("subtract", a, b, format, |x, y| x - y)
}

/// Multiplies two images pixel-wise: `a * b`.
pub fn multiply(a: &Image, b: &Image) -> RasterResult<Image> {
    let format = a.format().promote_multiply(b.format());
    binary("multiply", a, b, format, |x, y| x * y)
}

/// Divides two images pixel-wise: `a / b`.
///
/// Division by zero yields 0. The result is always a float format.
pub fn divide(a: &Image, b: &Image) -> RasterResult<Image> {
    let format = a.format().promote_divide(b.format());
    binary("divide", a, b, format, |x, y| if y == 0.0 { 0.0 } else { x / y })
}

/// Absolute value of every sample. Keeps the source format.
pub fn abs(src: &Image) -> RasterResult<Image> {
    unary(src, src.format(), f64::abs)
}

/// Linear transform of every sample: `v * scale + offset`.
///
/// The result is `F32` (or `F64` for `F64` input).
pub fn linear(src: &Image, scale: f64, offset: f64) -> RasterResult<Image> {
    unary(src, src.format().to_float(), move |v| v * scale + offset)
}

/// Converts an image to another format (rounding and saturating for
/// integer targets).
pub fn cast(src: &Image, format: BandFormat) -> RasterResult<Image> {
    if src.format() == format {
        return Ok(src.clone());
    }
    unary(src, format, |v| v)
}

fn unary<F>(src: &Image, format: BandFormat, f: F) -> RasterResult<Image>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    let (w, h) = src.dimensions();
    let row_len = w as usize * src.bands() as usize;
    let samples = src.samples();

    let mut data = vec![0.0f64; samples.len()];
    fill_rows(&mut data, row_len, |y, row| {
        let src_row = &samples[y * row_len..(y + 1) * row_len];
        for (d, &s) in row.iter_mut().zip(src_row) {
            *d = f(s);
        }
    });

    Ok(Image::from_samples(w, h, src.bands(), format, data)?)
}

/// Output band count for two operands, honouring one-band broadcast.
pub(crate) fn broadcast_bands(op: &'static str, a: u32, b: u32) -> RasterResult<u32> {
    if a == b || b == 1 {
        Ok(a)
    } else if a == 1 {
        Ok(b)
    } else {
        Err(RasterError::BandMismatch { op, a, b })
    }
}

fn binary<F>(
    op: &'static str,
    a: &Image,
    b: &Image,
    format: BandFormat,
    f: F,
) -> RasterResult<Image>
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    if !a.same_size(b) {
        return Err(RasterError::size_mismatch(op, a.dimensions(), b.dimensions()));
    }
    let nb = broadcast_bands(op, a.bands(), b.bands())? as usize;

    let (w, h) = a.dimensions();
    let (a_nb, b_nb) = (a.bands() as usize, b.bands() as usize);
    let (sa, sb) = (a.samples(), b.samples());

    let mut data = vec![0.0f64; w as usize * h as usize * nb];
    fill_rows(&mut data, w as usize * nb, |y, row| {
        let offset = y * w as usize;
        for (x, px) in row.chunks_mut(nb).enumerate() {
            let i = offset + x;
            for (c, out) in px.iter_mut().enumerate() {
                let va = sa[i * a_nb + if a_nb == 1 { 0 } else { c }];
                let vb = sb[i * b_nb + if b_nb == 1 { 0 } else { c }];
                *out = f(va, vb);
            }
        }
    });

    Ok(Image::from_samples(w, h, nb as u32, format, data)?)
}
