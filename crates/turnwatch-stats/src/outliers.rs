//! Interquartile-range outlier suppression.
//!
//! A value is kept when it lies inside `[Q1 - f * IQR, Q3 + f * IQR]`,
//! where `IQR = Q3 - Q1` and the quartiles use linear interpolation
//! (see [`compute_percentile`]).

use crate::percentiles::compute_percentile;

/// IQR rule parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierRule {
    /// IQR multiplier (1.5 = standard, 3.0 = very conservative)
    pub factor: f64,
}

impl Default for OutlierRule {
    fn default() -> Self {
        Self {
            factor: Self::DEFAULT_FACTOR,
        }
    }
}

impl OutlierRule {
    pub const DEFAULT_FACTOR: f64 = 1.5;

    /// Series shorter than this are never filtered.
    pub const MIN_FILTERED_LEN: usize = 4;

    #[must_use]
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Returns the inclusive `(lower, upper)` fences for `values`.
    ///
    /// Returns `None` if the series is too short to be filtered.
    #[must_use]
    pub fn bounds(&self, values: &[f64]) -> Option<(f64, f64)> {
        if values.len() < Self::MIN_FILTERED_LEN {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = compute_percentile(&sorted, 25.0);
        let q3 = compute_percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        Some((q1 - self.factor * iqr, q3 + self.factor * iqr))
    }

    /// Returns one flag per input value, `true` meaning "keep".
    ///
    /// # Examples
    ///
    /// ```
    /// use turnwatch_stats::outliers::OutlierRule;
    ///
    /// let rule = OutlierRule::default();
    /// assert_eq!(rule.keep_mask(&[1.0, 500.0]), [true, true]);
    /// assert_eq!(rule.keep_mask(&[1.0, 2.0, 3.0, 4.0, 100.0]).iter().filter(|k| **k).count(), 4);
    /// ```
    #[must_use]
    pub fn keep_mask(&self, values: &[f64]) -> Vec<bool> {
        match self.bounds(values) {
            Some((lower, upper)) => values.iter().map(|v| lower <= *v && *v <= upper).collect(),
            None => vec![true; values.len()],
        }
    }

    /// Returns the values that survive the rule, in their original order.
    #[must_use]
    pub fn filter(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.keep_mask(values))
            .filter_map(|(v, keep)| keep.then_some(*v))
            .collect()
    }
}
