//! Row-parallel fill helper.
//!
//! Every primitive writes its output one row at a time through
//! [`fill_rows`]. With the `parallel` feature the rows are spread over the
//! current rayon pool (the [`Engine`](crate::Engine) installs its own pool
//! around each call); without it they run in order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized row of `out`.
pub(crate) fn fill_rows<F>(out: &mut [f64], row_len: usize, f: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rows_indexes() {
        let mut data = vec![0.0; 12];
        fill_rows(&mut data, 4, |y, row| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = (y * 10 + x) as f64;
            }
        });
        assert_eq!(data[0], 0.0);
        assert_eq!(data[5], 11.0);
        assert_eq!(data[11], 23.0);
    }
}
