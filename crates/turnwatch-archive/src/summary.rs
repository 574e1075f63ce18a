//! Per-player statistical summary.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use turnwatch_stats::descriptive::DescriptiveStats;

use crate::record::MatchRecord;

#[derive(Debug, Clone)]
pub struct PlayerSummary {
    pub player: String,
    pub battles: usize,
    pub wins: usize,
    pub decision_time: DescriptiveStats,
    pub avg_turns: f64,
    pub first_match: Option<NaiveDate>,
    pub last_match: Option<NaiveDate>,
}

impl PlayerSummary {
    /// Summarizes `records`. Returns `None` for an empty slice.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_records(player: &str, records: &[MatchRecord]) -> Option<Self> {
        let decision_time = DescriptiveStats::new(records.iter().map(|r| r.avg_decision_time))?;
        let battles = records.len();
        let wins = records.iter().filter(|r| r.target_won()).count();
        let avg_turns =
            records.iter().map(|r| f64::from(r.turn_count)).sum::<f64>() / battles as f64;
        let to_date = |secs: i64| DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive());
        let first_match = records.iter().map(|r| r.match_timestamp).min().and_then(to_date);
        let last_match = records.iter().map(|r| r.match_timestamp).max().and_then(to_date);
        Some(Self {
            player: player.to_owned(),
            battles,
            wins,
            decision_time,
            avg_turns,
            first_match,
            last_match,
        })
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        100.0 * self.wins as f64 / self.battles as f64
    }
}

impl fmt::Display for PlayerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.decision_time;
        writeln!(f, "Player: {}", self.player)?;
        writeln!(f, "  Total battles (vs bots): {}", self.battles)?;
        writeln!(
            f,
            "  Win rate: {}/{} ({:.1}%)",
            self.wins,
            self.battles,
            self.win_rate()
        )?;
        writeln!(f, "  Average decision time: {:.2}s", stats.mean)?;
        writeln!(f, "  Min decision time: {:.2}s", stats.min)?;
        writeln!(f, "  Max decision time: {:.2}s", stats.max)?;
        writeln!(f, "  Median decision time: {:.2}s", stats.median)?;
        writeln!(f, "  Average turns per battle: {:.1}", self.avg_turns)?;
        if let (Some(first), Some(last)) = (self.first_match, self.last_match) {
            writeln!(f, "  Time range: {first} to {last}")?;
        }
        Ok(())
    }
}
