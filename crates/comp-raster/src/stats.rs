//! Image statistics.
//!
//! - [`stats`] - min/max/sum/sum of squares/mean/stddev with locations,
//!   for all bands together and for each band
//! - [`deviate`] - standard deviation over all samples
//!
//! Sums are accumulated in `f64` whatever the image format.

use crate::RasterResult;
use comp_core::{Image, StatsResult, StatsRow};

/// Running accumulator for one stats row.
#[derive(Debug, Clone, Copy)]
struct Accum {
    min: f64,
    max: f64,
    min_at: (u32, u32),
    max_at: (u32, u32),
    sum: f64,
    sum2: f64,
    count: u64,
}

impl Accum {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            min_at: (0, 0),
            max_at: (0, 0),
            sum: 0.0,
            sum2: 0.0,
            count: 0,
        }
    }

    #[inline]
    fn push(&mut self, v: f64, x: u32, y: u32) {
        // Strict comparisons keep the first occurrence in raster order.
        if v < self.min {
            self.min = v;
            self.min_at = (x, y);
        }
        if v > self.max {
            self.max = v;
            self.max_at = (x, y);
        }
        self.sum += v;
        self.sum2 += v * v;
        self.count += 1;
    }

    fn finish(&self) -> StatsRow {
        let n = self.count as f64;
        let mean = if self.count > 0 { self.sum / n } else { 0.0 };
        let stddev = if self.count > 1 {
            ((self.sum2 - self.sum * self.sum / n).abs() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        StatsRow {
            min: self.min,
            max: self.max,
            sum: self.sum,
            sum_of_squares: self.sum2,
            mean,
            stddev,
            xmin: self.min_at.0,
            ymin: self.min_at.1,
            xmax: self.max_at.0,
            ymax: self.max_at.1,
        }
    }
}

/// Computes the statistics table of `src`.
///
/// Row 0 aggregates every sample of every band; row `1 + b` covers band
/// `b` only. See [`StatsResult`] for the column layout.
pub fn stats(src: &Image) -> RasterResult<StatsResult> {
    let nb = src.bands() as usize;
    let w = src.width() as usize;
    let mut overall = Accum::new();
    let mut bands = vec![Accum::new(); nb];

    for (i, px) in src.samples().chunks(nb).enumerate() {
        let x = (i % w) as u32;
        let y = (i / w) as u32;
        for (acc, &v) in bands.iter_mut().zip(px) {
            acc.push(v, x, y);
            overall.push(v, x, y);
        }
    }

    Ok(StatsResult::new(
        overall.finish(),
        bands.iter().map(Accum::finish).collect(),
    ))
}

/// Sample standard deviation over every sample of `src`.
pub fn deviate(src: &Image) -> RasterResult<f64> {
    Ok(stats(src)?.overall().stddev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stats_rows() {
        // 2x1 image, 2 bands: (1, 10) (3, 10)
        let img = Image::from_u8(2, 1, 2, vec![1, 10, 3, 10]).unwrap();
        let s = stats(&img).unwrap();
        assert_eq!(s.band_count(), 2);

        let all = s.overall();
        assert_eq!(all.min, 1.0);
        assert_eq!(all.max, 10.0);
        assert_eq!(all.sum, 24.0);
        assert_eq!(all.sum_of_squares, 1.0 + 100.0 + 9.0 + 100.0);
        assert_eq!(all.mean, 6.0);
        assert_eq!((all.xmax, all.ymax), (0, 0));

        let b0 = s.band(0).unwrap();
        assert_eq!((b0.min, b0.max), (1.0, 3.0));
        assert_eq!((b0.xmax, b0.ymax), (1, 0));
        assert_relative_eq!(b0.stddev, 2.0f64.sqrt(), epsilon = 1e-12);

        let b1 = s.band(1).unwrap();
        assert_eq!(b1.stddev, 0.0);
    }

    #[test]
    fn test_locations_first_occurrence() {
        let img = Image::from_u8(2, 2, 1, vec![5, 0, 9, 0]).unwrap();
        let s = stats(&img).unwrap();
        let all = s.overall();
        assert_eq!((all.xmin, all.ymin), (1, 0));
        assert_eq!((all.xmax, all.ymax), (0, 1));
    }

    #[test]
    fn test_single_sample_has_zero_deviation() {
        let img = Image::from_u8(1, 1, 1, vec![42]).unwrap();
        assert_eq!(deviate(&img).unwrap(), 0.0);
    }

    #[test]
    fn test_deviate() {
        let img = Image::from_u8(4, 1, 1, vec![2, 4, 4, 6]).unwrap();
        // mean 4, squared deviations 4+0+0+4 over n-1 = 3
        assert_relative_eq!(deviate(&img).unwrap(), (8.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }
}
