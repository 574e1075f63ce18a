/// Computes a centered moving average.
///
/// The window around index `i` spans `[i - window / 2, i + window / 2]`
/// (integer division), clamped to the bounds of `values`. The output has
/// exactly one point per input point; edge windows average only the data
/// that is available.
///
/// A `window` of 0 or 1 returns the input unchanged.
///
/// # Examples
///
/// ```
/// use turnwatch_stats::moving_average::centered_moving_average;
///
/// assert_eq!(centered_moving_average(&[10.0, 20.0, 30.0], 3), [15.0, 20.0, 25.0]);
/// assert!(centered_moving_average(&[], 5).is_empty());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(values.len());
            let span = &values[start..end];
            span.iter().sum::<f64>() / span.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_length_matches_input() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        for window in 0..10 {
            assert_eq!(centered_moving_average(&values, window).len(), values.len());
        }
    }

    #[test]
    fn test_small_window_is_identity() {
        let values = [3.0, 1.0, 4.0];
        assert_eq!(centered_moving_average(&values, 0), values);
        assert_eq!(centered_moving_average(&values, 1), values);
    }

    #[test]
    fn test_even_window_spans_half_each_side() {
        // window 4 -> half 2 on each side
        let values = [0.0, 10.0, 20.0, 30.0, 40.0];
        assert_eq!(
            centered_moving_average(&values, 4),
            [10.0, 15.0, 20.0, 25.0, 30.0]
        );
    }

    #[test]
    fn test_window_larger_than_series() {
        let values = [2.0, 4.0];
        assert_eq!(centered_moving_average(&values, 50), [3.0, 3.0]);
    }
}
