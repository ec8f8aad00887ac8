//! Descriptive statistics over parsed metric columns
//!
//! Missing values are carried as `f64::NAN` and skipped, so a column with
//! unparseable cells still yields statistics over the cells that did parse.

use serde::{Deserialize, Serialize};

/// Mean, median and sample standard deviation of one metric column
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub stdev: f64,
    /// Number of non-missing values the statistics were computed over
    pub count: usize,
}

impl Summary {
    /// Summary with every statistic missing
    pub fn empty() -> Self {
        Self {
            mean: f64::NAN,
            median: f64::NAN,
            stdev: f64::NAN,
            count: 0,
        }
    }

    /// Calculate statistics, ignoring NaN entries
    pub fn from_values(values: &[f64]) -> Self {
        let mut present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let count = present.len();

        if count == 0 {
            return Self::empty();
        }

        let mean = present.iter().sum::<f64>() / count as f64;

        present.sort_by(|a, b| a.total_cmp(b));
        let median = calculate_median(&present);

        let stdev = if count < 2 {
            f64::NAN
        } else {
            calculate_standard_deviation(&present, mean)
        };

        Self { mean, median, stdev, count }
    }

    /// Calculate statistics over integer samples
    pub fn from_integers(values: &[i64]) -> Self {
        let values: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        Self::from_values(&values)
    }

    /// Whether at least one value contributed
    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

/// Median of an already sorted, NaN-free slice
fn calculate_median(sorted_values: &[f64]) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted_values[n / 2]
    } else {
        (sorted_values[n / 2 - 1] + sorted_values[n / 2]) / 2.0
    }
}

fn calculate_standard_deviation(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter()
        .map(|x| (x - mean).powi(2))
        .sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Convert a table cell to a number; anything non-numeric becomes NaN
pub fn coerce_numeric(token: &str) -> f64 {
    token.trim().parse::<f64>().unwrap_or(f64::NAN)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_values() {
        let summary = Summary::from_values(&[10.0, 20.0]);
        assert_eq!(summary.mean, 15.0);
        assert_eq!(summary.median, 15.0);
        assert!((summary.stdev - 7.0710678118654755).abs() < 1e-12);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_single_value_has_no_stdev() {
        let summary = Summary::from_values(&[10.0]);
        assert_eq!(summary.mean, 10.0);
        assert_eq!(summary.median, 10.0);
        assert!(summary.stdev.is_nan());
    }

    #[test]
    fn test_empty_is_all_nan() {
        let summary = Summary::from_values(&[]);
        assert!(summary.mean.is_nan());
        assert!(summary.median.is_nan());
        assert!(summary.stdev.is_nan());
        assert!(!summary.has_data());
    }

    #[test]
    fn test_nan_values_are_ignored() {
        let summary = Summary::from_values(&[f64::NAN, 4.0, f64::NAN, 8.0]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 6.0);
        assert_eq!(summary.median, 6.0);
    }

    #[test]
    fn test_only_nan_values_is_empty() {
        let summary = Summary::from_values(&[f64::NAN, f64::NAN]);
        assert!(summary.mean.is_nan());
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_odd_median_uses_middle_of_sorted() {
        let summary = Summary::from_values(&[9.0, 1.0, 5.0]);
        assert_eq!(summary.median, 5.0);
    }

    #[test]
    fn test_from_integers() {
        let summary = Summary::from_integers(&[5, 15]);
        assert_eq!(summary.mean, 10.0);
        assert_eq!(summary.median, 10.0);
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric("20"), 20.0);
        assert_eq!(coerce_numeric("19.5"), 19.5);
        assert_eq!(coerce_numeric(" 3 "), 3.0);
        assert!(coerce_numeric("abc").is_nan());
        assert!(coerce_numeric("").is_nan());
    }
}
