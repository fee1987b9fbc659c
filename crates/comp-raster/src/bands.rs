//! Band selection and concatenation.
//!
//! - [`extract_band`] - Copy a contiguous run of bands into a new image
//! - [`band_join`] - Append the bands of B after the bands of A
//!
//! ```rust
//! use comp_core::Image;
//! use comp_raster::bands::{band_join, extract_band};
//!
//! let rgba = Image::from_u8(1, 1, 4, vec![10, 20, 30, 255]).unwrap();
//! let rgb = extract_band(&rgba, 0, 3).unwrap();
//! let alpha = extract_band(&rgba, 3, 1).unwrap();
//! let back = band_join(&rgb, &alpha).unwrap();
//! assert_eq!(back, rgba);
//! ```

use crate::parallel::fill_rows;
use crate::{RasterError, RasterResult};
use comp_core::Image;

/// Extracts `count` bands starting at `start`.
///
/// The output keeps the source format.
pub fn extract_band(src: &Image, start: u32, count: u32) -> RasterResult<Image> {
    let end = start.checked_add(count).unwrap_or(u32::MAX);
    if count == 0 || end > src.bands() {
        return Err(RasterError::BandRange {
            start,
            end,
            bands: src.bands(),
        });
    }

    let (w, h) = src.dimensions();
    let src_nb = src.bands() as usize;
    let nb = count as usize;
    let first = start as usize;
    let samples = src.samples();

    let mut data = vec![0.0f64; w as usize * h as usize * nb];
    fill_rows(&mut data, w as usize * nb, |y, row| {
        let src_row = &samples[y * w as usize * src_nb..(y + 1) * w as usize * src_nb];
        for (dst_px, src_px) in row.chunks_mut(nb).zip(src_row.chunks(src_nb)) {
            dst_px.copy_from_slice(&src_px[first..first + nb]);
        }
    });

    Ok(Image::from_samples(w, h, count, src.format(), data)?)
}

/// Joins the bands of `a` and `b` into one image (`a` bands first).
///
/// Both images must have the same width and height. The output format is
/// the common format of the two inputs.
pub fn band_join(a: &Image, b: &Image) -> RasterResult<Image> {
    if !a.same_size(b) {
        return Err(RasterError::size_mismatch(
            "band_join",
            a.dimensions(),
            b.dimensions(),
        ));
    }

    let (w, h) = a.dimensions();
    let a_nb = a.bands() as usize;
    let b_nb = b.bands() as usize;
    let nb = a_nb + b_nb;
    let (sa, sb) = (a.samples(), b.samples());

    let mut data = vec![0.0f64; w as usize * h as usize * nb];
    fill_rows(&mut data, w as usize * nb, |y, row| {
        let offset = y * w as usize;
        for (x, px) in row.chunks_mut(nb).enumerate() {
            let i = offset + x;
            px[..a_nb].copy_from_slice(&sa[i * a_nb..(i + 1) * a_nb]);
            px[a_nb..].copy_from_slice(&sb[i * b_nb..(i + 1) * b_nb]);
        }
    });

    let format = a.format().common(b.format());
    Ok(Image::from_samples(w, h, nb as u32, format, data)?)
}
