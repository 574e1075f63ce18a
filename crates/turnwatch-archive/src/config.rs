//! Tunable pipeline parameters.
//!
//! Every component receives the values it needs when it is constructed, so
//! tests can vary them locally.

/// Parameters shared by the transcript pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Exclusive upper bound (seconds) on a gap between consecutive events
    /// for it to count as a decision.
    pub max_gap_secs: i64,
    /// Case-insensitive prefix identifying bot-class opponents.
    pub opponent_prefix: String,
    /// File name suffix of transcript files inside a day directory.
    pub transcript_suffix: String,
    /// Prefix of event-log entries carrying an epoch-second timestamp.
    pub timestamp_tag: String,
}

impl PipelineConfig {
    pub const DEFAULT_MAX_GAP_SECS: i64 = 300;
    pub const DEFAULT_OPPONENT_PREFIX: &str = "pac-mm";
    pub const DEFAULT_TRANSCRIPT_SUFFIX: &str = ".log.json";
    pub const DEFAULT_TIMESTAMP_TAG: &str = "|t:|";
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_gap_secs: Self::DEFAULT_MAX_GAP_SECS,
            opponent_prefix: Self::DEFAULT_OPPONENT_PREFIX.to_owned(),
            transcript_suffix: Self::DEFAULT_TRANSCRIPT_SUFFIX.to_owned(),
            timestamp_tag: Self::DEFAULT_TIMESTAMP_TAG.to_owned(),
        }
    }
}
