//! Sequential fold of an archive window into an [`AggregatedDataset`].

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    config::PipelineConfig,
    dataset::AggregatedDataset,
    date_window::DateWindow,
    estimator::DecisionTimeEstimator,
    filter::{MatchFilter, Verdict},
    locator::ArchiveLocator,
    record::{self, MatchRecord},
    transcript::{Transcript, TranscriptError},
};

/// Number of matches described in full in verbose output.
const DETAILED_MATCHES: usize = 3;
const PROGRESS_INTERVAL: usize = 10;
/// Opponents listed by name in the per-player breakdown, beyond which only a count is shown.
const MAX_NAMED_OPPONENTS: usize = 5;

/// What became of one candidate file.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum FileOutcome {
    Matched(MatchRecord),
    NoTarget,
    OpponentNotBot,
    /// Fewer than two timestamps, or no gap inside the validity window.
    NoEstimate,
    NoStartTime,
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub files_seen: usize,
    pub parse_failures: usize,
    pub matched: usize,
    pub duplicates: usize,
    pub no_target: usize,
    pub opponent_not_bot: usize,
    pub no_estimate: usize,
    pub no_start_time: usize,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    locator: ArchiveLocator,
    filter: MatchFilter,
    estimator: DecisionTimeEstimator,
    timestamp_tag: String,
    transcript_suffix: String,
}

impl Aggregator {
    pub fn new<P, I, S>(root: P, category: &str, targets: I, config: &PipelineConfig) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            locator: ArchiveLocator::new(root, category, config.transcript_suffix.clone()),
            filter: MatchFilter::new(targets, &config.opponent_prefix),
            estimator: DecisionTimeEstimator::new(config.max_gap_secs),
            timestamp_tag: config.timestamp_tag.clone(),
            transcript_suffix: config.transcript_suffix.clone(),
        }
    }

    /// Runs one transcript through parsing, filtering and estimation.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome, TranscriptError> {
        let transcript = Transcript::open(path)?;
        Ok(self.process_transcript(path, &transcript))
    }

    #[must_use]
    pub fn process_transcript(&self, path: &Path, transcript: &Transcript) -> FileOutcome {
        let pairing = match self.filter.check(transcript) {
            Verdict::Accepted(pairing) => pairing,
            Verdict::NoTarget => return FileOutcome::NoTarget,
            Verdict::OpponentNotBot { .. } => return FileOutcome::OpponentNotBot,
        };

        let timestamps = transcript.event_timestamps(&self.timestamp_tag);
        let Some(avg_decision_time) = self.estimator.estimate(&timestamps) else {
            tracing::trace!("{}: no usable decision gaps", path.display());
            return FileOutcome::NoEstimate;
        };
        let Some(match_timestamp) = transcript.start_timestamp(&timestamps) else {
            tracing::trace!("{}: no resolvable start time", path.display());
            return FileOutcome::NoStartTime;
        };

        FileOutcome::Matched(MatchRecord {
            target_identity: pairing.target.to_owned(),
            opponent_identity: pairing.opponent.to_owned(),
            avg_decision_time,
            match_timestamp,
            turn_count: transcript.turns,
            outcome: transcript.winner.clone(),
            match_id: record::match_id_from_path(path, &self.transcript_suffix),
            source_path: path.display().to_string(),
        })
    }

    /// Folds every candidate in `window` into a dataset sorted chronologically.
    ///
    /// Unreadable or malformed transcripts are logged and skipped.
    pub fn run(&self, window: &DateWindow) -> (AggregatedDataset, PipelineReport) {
        let mut dataset = AggregatedDataset::new();
        let mut report = PipelineReport::default();

        for path in self.locator.candidates(window) {
            report.files_seen += 1;
            let outcome = match self.process_file(&path) {
                Ok(outcome) => outcome,
                Err(e) => {
                    report.parse_failures += 1;
                    tracing::warn!("Error processing {}: {}", path.display(), error_chain(&e));
                    continue;
                }
            };
            match outcome {
                FileOutcome::Matched(record) => {
                    let summary = format!(
                        "{} vs {}, battle {}, avg time {:.2}s, turns {}",
                        record.target_identity,
                        record.opponent_identity,
                        record.match_id,
                        record.avg_decision_time,
                        record.turn_count
                    );
                    if !dataset.insert(record) {
                        report.duplicates += 1;
                        tracing::debug!("Skipping duplicate battle: {summary}");
                        continue;
                    }
                    report.matched += 1;
                    if report.matched <= DETAILED_MATCHES {
                        tracing::debug!("Match #{}: {summary}", report.matched);
                    } else if report.matched.is_multiple_of(PROGRESS_INTERVAL) {
                        tracing::debug!("Found {} matching battles so far...", report.matched);
                    }
                }
                FileOutcome::NoTarget => report.no_target += 1,
                FileOutcome::OpponentNotBot => report.opponent_not_bot += 1,
                FileOutcome::NoEstimate => report.no_estimate += 1,
                FileOutcome::NoStartTime => report.no_start_time += 1,
            }
        }

        dataset.sort_chronologically();
        log_breakdown(&dataset, &report);
        (dataset, report)
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn log_breakdown(dataset: &AggregatedDataset, report: &PipelineReport) {
    tracing::debug!("Processing complete:");
    tracing::debug!("  Total files processed: {}", report.files_seen);
    tracing::debug!("  Matching battles found: {}", report.matched);
    for (player, records) in dataset.players() {
        let mut opponents = BTreeMap::<&str, usize>::new();
        for record in records {
            *opponents.entry(&record.opponent_identity).or_default() += 1;
        }
        tracing::debug!("  {player}: {} battles", records.len());
        if opponents.len() <= MAX_NAMED_OPPONENTS {
            let mut opponents = opponents.into_iter().collect::<Vec<_>>();
            opponents.sort_by(|a, b| b.1.cmp(&a.1));
            for (opponent, count) in opponents {
                tracing::debug!("    vs {opponent}: {count} battles");
            }
        } else {
            tracing::debug!("    vs {} different bots", opponents.len());
        }
    }
}
