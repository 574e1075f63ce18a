//! Read-only projections of a player's records for downstream consumers.

use turnwatch_stats::{moving_average::centered_moving_average, outliers::OutlierRule};

use crate::record::MatchRecord;

/// A player's decision times as parallel, chronologically ordered columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSeries {
    pub timestamps: Vec<i64>,
    pub avg_decision_times: Vec<f64>,
}

impl PlayerSeries {
    /// Builds the series ordered by match start, leaving `records` untouched.
    #[must_use]
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut sorted = records.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|r| r.match_timestamp);
        Self {
            timestamps: sorted.iter().map(|r| r.match_timestamp).collect(),
            avg_decision_times: sorted.iter().map(|r| r.avg_decision_time).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.avg_decision_times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.avg_decision_times.is_empty()
    }

    /// Copy of the series without points outside the IQR fences.
    #[must_use]
    pub fn without_outliers(&self, rule: &OutlierRule) -> Self {
        let mask = rule.keep_mask(&self.avg_decision_times);
        let keep = |i: &usize| mask[*i];
        Self {
            timestamps: (0..self.len())
                .filter(keep)
                .map(|i| self.timestamps[i])
                .collect(),
            avg_decision_times: (0..self.len())
                .filter(keep)
                .map(|i| self.avg_decision_times[i])
                .collect(),
        }
    }

    /// Centered moving average of the decision times, one point per match.
    #[must_use]
    pub fn moving_average(&self, window: usize) -> Vec<f64> {
        centered_moving_average(&self.avg_decision_times, window)
    }
}
