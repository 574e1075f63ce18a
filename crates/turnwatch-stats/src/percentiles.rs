//! Linear-interpolation percentiles.

/// Computes a single percentile value from sorted data.
///
/// This function uses linear interpolation between the two closest ranks.
/// For a dataset with n values, the k-th percentile sits at fractional
/// position `(n - 1) * k / 100`; the result interpolates between the
/// values at the floor and ceiling of that position.
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use turnwatch_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 25.0), 1.75);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let rank = (last as f64 * percentile.clamp(0.0, 100.0)) / 100.0;
    let lower = (rank.floor() as usize).min(last);
    let upper = (rank.ceil() as usize).min(last);
    let fraction = rank - rank.floor();
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_single_value_is_every_percentile() {
        for p in [0.0, 25.0, 50.0, 75.0, 100.0] {
            assert_eq!(compute_percentile(&[7.0], p), 7.0);
        }
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert_eq!(compute_percentile(&values, 25.0), 2.0);
        assert_eq!(compute_percentile(&values, 75.0), 4.0);

        let values = [10.0, 20.0];
        assert_eq!(compute_percentile(&values, 50.0), 15.0);
        assert_eq!(compute_percentile(&values, 90.0), 19.0);
    }

    #[test]
    fn test_bounds_are_min_and_max() {
        let values = [3.0, 5.0, 8.0];
        assert_eq!(compute_percentile(&values, 0.0), 3.0);
        assert_eq!(compute_percentile(&values, 100.0), 8.0);
    }
}
