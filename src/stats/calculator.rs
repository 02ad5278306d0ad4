//! Statistics Calculator Module
//! Descriptive statistics, histogram binning, kernel density and box plot summaries.

use polars::prelude::*;
use rayon::prelude::*;
use statrs::distribution::{Continuous, Normal};

/// Tukey fence multiplier for box plot whiskers
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Upper bound on histogram bins; a tiny IQR with a far outlier would otherwise explode
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for SummaryStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Equal-width histogram. `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramData {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub bin_width: f64,
}

impl HistogramData {
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Center of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }
}

/// Five-number summary with outliers, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
    pub mean: f64,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Non-null, finite values of a column as f64. Missing or non-numeric columns yield nothing.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Vec<f64> {
        df.column(column)
            .ok()
            .and_then(|col| col.cast(&DataType::Float64).ok())
            .map(|col| {
                col.f64()
                    .ok()
                    .map(|ca| ca.into_iter().flatten().filter(|v| v.is_finite()).collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// Rows where both columns hold a finite value, as `[x, y]` pairs.
    pub fn scatter_pairs(df: &DataFrame, x_col: &str, y_col: &str) -> Vec<[f64; 2]> {
        let column = |name: &str| {
            df.column(name)
                .ok()
                .and_then(|col| col.cast(&DataType::Float64).ok())
        };
        let (Some(xs), Some(ys)) = (column(x_col), column(y_col)) else {
            return Vec::new();
        };
        let (Ok(xs), Ok(ys)) = (xs.f64(), ys.f64()) else {
            return Vec::new();
        };

        xs.into_iter()
            .zip(ys.into_iter())
            .filter_map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some([x, y]),
                _ => None,
            })
            .collect()
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample standard deviation (ddof = 1).
    fn sample_std(values: &[f64], mean: f64) -> f64 {
        let n = values.len();
        if n < 2 {
            return 0.0;
        }
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_summary(values: &[f64]) -> SummaryStats {
        let n = values.len();
        if n == 0 {
            return SummaryStats::default();
        }

        let sorted = Self::sorted(values);
        let mean = Self::mean(values);

        SummaryStats {
            count: n,
            mean,
            std: Self::sample_std(values, mean),
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Histogram with NumPy's `auto` bin rule: the narrower of the Sturges and
    /// Freedman-Diaconis widths, falling back to Sturges when the IQR is zero.
    pub fn histogram(values: &[f64]) -> HistogramData {
        let n = values.len();
        if n == 0 {
            return HistogramData::default();
        }

        let sorted = Self::sorted(values);
        let (mut first, mut last) = (sorted[0], sorted[n - 1]);
        if first == last {
            first -= 0.5;
            last += 0.5;
        }
        let range = last - first;

        let sturges = range / ((n as f64).log2() + 1.0);
        let iqr = Self::percentile(&sorted, 75.0) - Self::percentile(&sorted, 25.0);
        let fd = 2.0 * iqr / (n as f64).cbrt();
        let width = if fd > 0.0 { fd.min(sturges) } else { sturges };

        let bins = if sorted[0] == sorted[n - 1] || width <= 0.0 {
            1
        } else {
            ((range / width).ceil() as usize).clamp(1, MAX_HISTOGRAM_BINS)
        };
        let bin_width = range / bins as f64;

        let mut edges: Vec<f64> = (0..=bins).map(|i| first + i as f64 * bin_width).collect();
        edges[bins] = last;

        let mut counts = vec![0usize; bins];
        for &v in &sorted {
            // Right-most edge is inclusive
            let mut idx = ((((v - first) / range) * bins as f64).floor() as usize).min(bins - 1);
            // Rounding in the division can land one bin off the stored edges
            if idx > 0 && v < edges[idx] {
                idx -= 1;
            } else if idx + 1 < bins && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        HistogramData {
            edges,
            counts,
            bin_width,
        }
    }

    /// Gaussian kernel density estimate with Scott's bandwidth, evaluated on
    /// `grid_points` points between the data minimum and maximum and multiplied
    /// by `scale` (use `n * bin_width` to overlay a count histogram).
    pub fn kde(values: &[f64], grid_points: usize, scale: f64) -> Option<Vec<[f64; 2]>> {
        let n = values.len();
        if n < 2 || grid_points < 2 {
            return None;
        }

        let mean = Self::mean(values);
        let std = Self::sample_std(values, mean);
        if std <= 0.0 || !std.is_finite() {
            return None;
        }
        let bandwidth = std * (n as f64).powf(-0.2);
        let kernel = Normal::new(0.0, 1.0).ok()?;

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let step = (max - min) / (grid_points - 1) as f64;

        let curve = (0..grid_points)
            .into_par_iter()
            .map(|i| {
                let x = min + i as f64 * step;
                let density = values
                    .iter()
                    .map(|&xi| kernel.pdf((x - xi) / bandwidth))
                    .sum::<f64>()
                    / (n as f64 * bandwidth);
                [x, density * scale]
            })
            .collect();

        Some(curve)
    }

    /// Quartiles, Tukey whiskers and outliers.
    pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }

        let sorted = Self::sorted(values);
        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(BoxStats {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
            mean: Self::mean(values),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::sample_loader;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summary_matches_numpy() {
        let stats = StatsCalculator::compute_summary(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stats.count, 4);
        assert!(approx(stats.mean, 2.5));
        assert!(approx(stats.median, 2.5));
        assert!(approx(stats.p25, 1.75));
        assert!(approx(stats.p75, 3.25));
        assert!(approx(stats.std, (5.0f64 / 3.0).sqrt()));
    }

    #[test]
    fn test_summary_empty() {
        let stats = StatsCalculator::compute_summary(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let hist = StatsCalculator::histogram(&values);
        assert_eq!(hist.total(), 100);
        assert_eq!(hist.edges.len(), hist.bin_count() + 1);
        assert!(approx(hist.edges[0], 0.0));
        assert!(approx(*hist.edges.last().unwrap(), 99.0));
        // Sturges gives 8 bins, Freedman-Diaconis 5; the narrower width wins
        assert_eq!(hist.bin_count(), 8);
    }

    #[test]
    fn test_histogram_values_fall_inside_their_bin() {
        let values: Vec<f64> = (0..=30).map(|v| v as f64 * 0.1).collect();
        let hist = StatsCalculator::histogram(&values);
        let last = hist.bin_count() - 1;

        for (i, &count) in hist.counts.iter().enumerate() {
            let (lo, hi) = (hist.edges[i], hist.edges[i + 1]);
            let expected = values
                .iter()
                .filter(|&&v| v >= lo && (v < hi || (i == last && v <= hi)))
                .count();
            assert_eq!(count, expected, "bin {i} [{lo}, {hi})");
        }
        assert_eq!(hist.total(), values.len());
    }

    #[test]
    fn test_histogram_bin_count_is_capped() {
        let mut values: Vec<f64> = (0..100).map(|v| v as f64 * 1e-6).collect();
        values.push(1e6);
        let hist = StatsCalculator::histogram(&values);
        assert_eq!(hist.bin_count(), MAX_HISTOGRAM_BINS);
        assert_eq!(hist.total(), 101);
        assert_eq!(hist.counts[MAX_HISTOGRAM_BINS - 1], 1);
    }

    #[test]
    fn test_histogram_constant_column() {
        let hist = StatsCalculator::histogram(&[7.0, 7.0, 7.0]);
        assert_eq!(hist.counts, vec![3]);
        assert!(approx(hist.edges[0], 6.5));
        assert!(approx(hist.edges[1], 7.5));
    }

    #[test]
    fn test_histogram_empty() {
        assert_eq!(StatsCalculator::histogram(&[]), HistogramData::default());
    }

    #[test]
    fn test_kde_scaled_area() {
        let values: Vec<f64> = (0..50).map(|v| (v % 10) as f64).collect();
        let curve = StatsCalculator::kde(&values, 200, 1.0).expect("curve");
        assert_eq!(curve.len(), 200);
        assert!(curve.iter().all(|p| p[1] >= 0.0));
        assert!(approx(curve[0][0], 0.0));
        assert!(approx(curve[199][0], 9.0));
    }

    #[test]
    fn test_kde_needs_variance() {
        assert!(StatsCalculator::kde(&[1.0], 200, 1.0).is_none());
        assert!(StatsCalculator::kde(&[2.0, 2.0, 2.0], 200, 1.0).is_none());
    }

    #[test]
    fn test_box_stats_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let stats = StatsCalculator::box_stats(&values).expect("stats");
        assert!(approx(stats.q1, 2.25));
        assert!(approx(stats.median, 3.5));
        assert!(approx(stats.q3, 4.75));
        assert!(approx(stats.whisker_low, 1.0));
        assert!(approx(stats.whisker_high, 5.0));
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_box_stats_empty() {
        assert!(StatsCalculator::box_stats(&[]).is_none());
    }

    #[test]
    fn test_every_numeric_column_computes() {
        let loader = sample_loader();
        let df = loader.get_dataframe().expect("frame");
        let numeric = loader.get_numeric_columns();

        for column in &numeric {
            let values = StatsCalculator::numeric_values(df, column);
            assert_eq!(values.len(), 10, "{column}");
            assert_eq!(StatsCalculator::histogram(&values).total(), 10);
            assert!(StatsCalculator::box_stats(&values).is_some());
            for other in &numeric {
                assert_eq!(StatsCalculator::scatter_pairs(df, column, other).len(), 10);
            }
        }
    }

    #[test]
    fn test_missing_column_yields_nothing() {
        let loader = sample_loader();
        let df = loader.get_dataframe().expect("frame");
        assert!(StatsCalculator::numeric_values(df, "Caffeine (mg)").is_empty());
        assert!(StatsCalculator::scatter_pairs(df, "Calories", "Caffeine (mg)").is_empty());
    }
}
