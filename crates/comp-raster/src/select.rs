//! Per-pixel selection between two images.
//!
//! [`if_then_else`] picks samples from `then` or `else_` under control of a
//! condition image. With `blend` the condition acts as a 0-255 mix weight,
//! which is how straight-alpha "over" is expressed.

use crate::arithmetic::broadcast_bands;
use crate::parallel::fill_rows;
use crate::{RasterError, RasterResult};
use comp_core::Image;

/// Selects or blends between `then` and `else_` using `cond`.
///
/// - `blend == false`: a non-zero condition sample selects `then`,
///   zero selects `else_`.
/// - `blend == true`: `then * c/255 + else_ * (1 - c/255)` with `c`
///   clamped to `[0, 255]`.
///
/// `then` and `else_` follow the usual one-band broadcast. `cond` must have
/// one band or as many bands as the output. The output format is the
/// common format of `then` and `else_`.
pub fn if_then_else(cond: &Image, then: &Image, else_: &Image, blend: bool) -> RasterResult<Image> {
    for other in [then, else_] {
        if !cond.same_size(other) {
            return Err(RasterError::size_mismatch(
                "if_then_else",
                cond.dimensions(),
                other.dimensions(),
            ));
        }
    }
    let nb = broadcast_bands("if_then_else", then.bands(), else_.bands())?;
    if cond.bands() != 1 && cond.bands() != nb {
        return Err(RasterError::BandMismatch {
            op: "if_then_else",
            a: cond.bands(),
            b: nb,
        });
    }

    let (w, h) = cond.dimensions();
    let nb = nb as usize;
    let (c_nb, t_nb, e_nb) = (
        cond.bands() as usize,
        then.bands() as usize,
        else_.bands() as usize,
    );
    let (sc, st, se) = (cond.samples(), then.samples(), else_.samples());
    let pick = |n: usize, c: usize| if n == 1 { 0 } else { c };

    let mut data = vec![0.0f64; w as usize * h as usize * nb];
    fill_rows(&mut data, w as usize * nb, |y, row| {
        let offset = y * w as usize;
        for (x, px) in row.chunks_mut(nb).enumerate() {
            let i = offset + x;
            for (c, out) in px.iter_mut().enumerate() {
                let k = sc[i * c_nb + pick(c_nb, c)];
                let t = st[i * t_nb + pick(t_nb, c)];
                let e = se[i * e_nb + pick(e_nb, c)];
                *out = if blend {
                    let f = k.clamp(0.0, 255.0) / 255.0;
                    t * f + e * (1.0 - f)
                } else if k != 0.0 {
                    t
                } else {
                    e
                };
            }
        }
    });

    let format = then.format().common(else_.format());
    Ok(Image::from_samples(w, h, nb as u32, format, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use comp_core::BandFormat;

    #[test]
    fn test_select() {
        let cond = Image::from_u8(3, 1, 1, vec![0, 1, 255]).unwrap();
        let then = Image::filled(3, 1, BandFormat::U8, &[100.0, 200.0]).unwrap();
        let else_ = Image::filled(3, 1, BandFormat::U8, &[7.0, 9.0]).unwrap();
        let out = if_then_else(&cond, &then, &else_, false).unwrap();
        assert_eq!(out.samples(), &[7.0, 9.0, 100.0, 200.0, 100.0, 200.0]);
    }

    #[test]
    fn test_blend() {
        let cond = Image::from_u8(3, 1, 1, vec![0, 51, 255]).unwrap();
        let then = Image::filled(3, 1, BandFormat::U8, &[255.0]).unwrap();
        let else_ = Image::filled(3, 1, BandFormat::U8, &[0.0]).unwrap();
        let out = if_then_else(&cond, &then, &else_, true).unwrap();
        assert_eq!(out.samples(), &[0.0, 51.0, 255.0]);
    }

    #[test]
    fn test_blend_clamps_condition() {
        let cond = Image::from_f32(1, 1, 1, vec![400.0]).unwrap();
        let then = Image::from_f32(1, 1, 1, vec![10.0]).unwrap();
        let else_ = Image::from_f32(1, 1, 1, vec![20.0]).unwrap();
        let out = if_then_else(&cond, &then, &else_, true).unwrap();
        assert_eq!(out.samples(), &[10.0]);
    }

    #[test]
    fn test_condition_bands_checked() {
        let cond = Image::filled(1, 1, BandFormat::U8, &[1.0, 1.0]).unwrap();
        let rgb = Image::filled(1, 1, BandFormat::U8, &[1.0, 2.0, 3.0]).unwrap();
        let err = if_then_else(&cond, &rgb, &rgb, false).unwrap_err();
        assert!(matches!(err, RasterError::BandMismatch { a: 2, b: 3, .. }));
    }
}
