use std::path::Path;

use serde::{Deserialize, Serialize};

/// One accepted transcript with a usable decision-time estimate.
///
/// Serialized field names follow the output dataset schema; the target
/// identity is the key of the enclosing map and is not repeated per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Display name of the matched target, as observed in the transcript
    #[serde(skip)]
    pub target_identity: String,
    #[serde(rename = "opponent")]
    pub opponent_identity: String,
    /// Mean decision time in seconds, always positive
    pub avg_decision_time: f64,
    /// Match start, epoch seconds
    #[serde(rename = "battle_timestamp")]
    pub match_timestamp: i64,
    #[serde(rename = "turns")]
    pub turn_count: u32,
    /// Winner identity, empty if undeclared
    #[serde(rename = "winner")]
    pub outcome: String,
    #[serde(rename = "battle_id")]
    pub match_id: String,
    /// Provenance only
    #[serde(rename = "log_file")]
    pub source_path: String,
}

impl MatchRecord {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.avg_decision_time.is_finite() && self.avg_decision_time > 0.0
    }

    /// Whether the target won, comparing identities case-insensitively.
    #[must_use]
    pub fn target_won(&self) -> bool {
        !self.outcome.is_empty() && self.outcome.to_lowercase() == self.target_identity.to_lowercase()
    }
}

/// Stable match identifier: the file name with the transcript suffix removed.
///
/// Falls back to the file stem when the name does not carry `suffix`.
#[must_use]
pub fn match_id_from_path(path: &Path, suffix: &str) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    match name.strip_suffix(suffix) {
        Some(id) if !id.is_empty() => id.to_owned(),
        _ => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}
