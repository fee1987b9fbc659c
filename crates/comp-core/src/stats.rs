//! Aggregate statistics of an image.
//!
//! A [`StatsResult`] holds one aggregate row over all bands followed by one
//! row per band. Each row has the fixed column order
//! `[min, max, sum, sum_of_squares, mean, stddev, xmin, ymin, xmax, ymax]`,
//! available both as named fields ([`StatsRow`]) and as a flat matrix
//! ([`StatsResult::to_matrix`]).

/// Number of columns in a stats row.
pub const STATS_COLUMNS: usize = 10;

/// Column index of the minimum.
pub const COL_MIN: usize = 0;
/// Column index of the maximum.
pub const COL_MAX: usize = 1;
/// Column index of the sum.
pub const COL_SUM: usize = 2;
/// Column index of the sum of squares.
pub const COL_SUM2: usize = 3;
/// Column index of the mean.
pub const COL_MEAN: usize = 4;
/// Column index of the standard deviation.
pub const COL_STDDEV: usize = 5;

/// One row of statistics (aggregate or single band).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsRow {
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Sum of samples.
    pub sum: f64,
    /// Sum of squared samples.
    pub sum_of_squares: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator), 0 for n <= 1.
    pub stddev: f64,
    /// X of the first minimum in raster order.
    pub xmin: u32,
    /// Y of the first minimum in raster order.
    pub ymin: u32,
    /// X of the first maximum in raster order.
    pub xmax: u32,
    /// Y of the first maximum in raster order.
    pub ymax: u32,
}

impl StatsRow {
    /// Row values in fixed column order.
    pub fn to_array(&self) -> [f64; STATS_COLUMNS] {
        [
            self.min,
            self.max,
            self.sum,
            self.sum_of_squares,
            self.mean,
            self.stddev,
            self.xmin as f64,
            self.ymin as f64,
            self.xmax as f64,
            self.ymax as f64,
        ]
    }
}

/// Statistics table: row 0 aggregates all bands, row `1 + b` is band `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsResult {
    rows: Vec<StatsRow>,
}

impl StatsResult {
    /// Builds a table from the aggregate row and the per-band rows.
    pub fn new(overall: StatsRow, bands: Vec<StatsRow>) -> Self {
        let mut rows = Vec::with_capacity(bands.len() + 1);
        rows.push(overall);
        rows.extend(bands);
        Self { rows }
    }

    /// Aggregate row over every band.
    #[inline]
    pub fn overall(&self) -> &StatsRow {
        &self.rows[0]
    }

    /// Row for a single band, if it exists.
    #[inline]
    pub fn band(&self, band: usize) -> Option<&StatsRow> {
        self.rows.get(band + 1)
    }

    /// Number of bands described (rows minus the aggregate).
    #[inline]
    pub fn band_count(&self) -> usize {
        self.rows.len() - 1
    }

    /// All rows, aggregate first.
    #[inline]
    pub fn rows(&self) -> &[StatsRow] {
        &self.rows
    }

    /// Flat row-major matrix of `(bands + 1) x 10` values.
    pub fn to_matrix(&self) -> Vec<f64> {
        self.rows.iter().flat_map(|r| r.to_array()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_layout() {
        let overall = StatsRow {
            sum_of_squares: 100.0,
            ..Default::default()
        };
        let band = StatsRow {
            max: 10.0,
            xmax: 3,
            ..Default::default()
        };
        let stats = StatsResult::new(overall, vec![band, StatsRow::default()]);
        let m = stats.to_matrix();
        assert_eq!(m.len(), 3 * STATS_COLUMNS);
        assert_eq!(m[COL_SUM2], 100.0);
        assert_eq!(m[STATS_COLUMNS + COL_MAX], 10.0);
        assert_eq!(m[STATS_COLUMNS + 8], 3.0);
        assert_eq!(stats.band_count(), 2);
        assert!(stats.band(2).is_none());
    }
}
