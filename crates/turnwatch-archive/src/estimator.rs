//! Average decision time from event timestamps.

/// Estimates the mean gap between consecutive events.
///
/// A gap counts only when `0 < gap < max_gap_secs`; other gaps are
/// excluded from both the sum and the count. A difference that does not
/// fit in an `i64` is treated as out of window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionTimeEstimator {
    max_gap_secs: i64,
}

impl DecisionTimeEstimator {
    #[must_use]
    pub fn new(max_gap_secs: i64) -> Self {
        Self { max_gap_secs }
    }

    /// Gaps between consecutive timestamps that fall inside the validity window.
    pub fn valid_gaps<'a>(&self, timestamps: &'a [i64]) -> impl Iterator<Item = i64> + 'a {
        let max_gap = self.max_gap_secs;
        timestamps
            .windows(2)
            .filter_map(|pair| pair[1].checked_sub(pair[0]))
            .filter(move |gap| 0 < *gap && *gap < max_gap)
    }

    /// Returns the mean valid gap in seconds.
    ///
    /// Returns `None` when fewer than two timestamps are given or no gap
    /// survives filtering.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn estimate(&self, timestamps: &[i64]) -> Option<f64> {
        let (sum, count) = self
            .valid_gaps(timestamps)
            .fold((0_i128, 0_usize), |(sum, count), gap| {
                (sum + i128::from(gap), count + 1)
            });
        (count > 0).then(|| sum as f64 / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> DecisionTimeEstimator {
        DecisionTimeEstimator::new(300)
    }

    #[test]
    fn test_mean_of_gaps() {
        let avg = estimator().estimate(&[0, 10, 25, 40]).unwrap();
        assert!((avg - 40.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_timestamps() {
        assert_eq!(estimator().estimate(&[]), None);
        assert_eq!(estimator().estimate(&[1_759_276_763]), None);
    }

    #[test]
    fn test_out_of_window_gaps_are_excluded_not_clamped() {
        // gaps: 0, -5, 300, 20, 299, 1000
        let timestamps = [100, 100, 95, 395, 415, 714, 1714];
        assert_eq!(
            estimator().valid_gaps(&timestamps).collect::<Vec<_>>(),
            [20, 299]
        );
        assert_eq!(estimator().estimate(&timestamps), Some(159.5));
    }

    #[test]
    fn test_all_gaps_invalid_is_no_estimate() {
        assert_eq!(estimator().estimate(&[10, 10, 10]), None);
        assert_eq!(estimator().estimate(&[0, 300, 600]), None);
        assert_eq!(estimator().estimate(&[50, 40, 30]), None);
    }

    #[test]
    fn test_overflowing_differences_are_invalid() {
        assert_eq!(estimator().estimate(&[i64::MAX, i64::MIN + 50]), None);
        assert_eq!(estimator().estimate(&[i64::MIN, i64::MAX]), None);
        assert_eq!(
            estimator()
                .valid_gaps(&[i64::MAX, i64::MIN + 50, i64::MIN + 60])
                .collect::<Vec<_>>(),
            [10]
        );
    }

    #[test]
    fn test_large_window_sum_does_not_overflow() {
        let huge = DecisionTimeEstimator::new(i64::MAX);
        let timestamps = [0, i64::MAX - 1, i64::MAX];
        assert_eq!(huge.estimate(&timestamps), Some(2_f64.powi(62)));
    }

    #[test]
    fn test_window_is_configurable() {
        let timestamps = [0, 30, 90];
        assert_eq!(DecisionTimeEstimator::new(60).estimate(&timestamps), Some(30.0));
        assert_eq!(DecisionTimeEstimator::new(61).estimate(&timestamps), Some(45.0));
    }
}
