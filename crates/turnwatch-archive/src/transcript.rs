//! Decoding of archived match transcripts.
//!
//! A transcript is a JSON document:
//!
//! ```json
//! {
//!   "p1": "Alice",
//!   "p2": "PAC-MM-Bot",
//!   "log": ["|player|p1|Alice", "|t:|1759276763", "|turn|1", "|t:|1759276770"],
//!   "winner": "Alice",
//!   "turns": 12,
//!   "timestamp": "Wed Oct 01 2025 00:00:00 GMT+0000 (Coordinated Universal Time)"
//! }
//! ```
//!
//! Only the participant names are required. Every other field may be
//! absent; `timestamp` may also be an epoch-second integer.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use chrono::DateTime;
use serde::Deserialize;

/// Format of a textual declared start time.
pub const DECLARED_START_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z (Coordinated Universal Time)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Side {
    #[display("p1")]
    P1,
    #[display("p2")]
    P2,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TranscriptError {
    #[display("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("failed to parse {}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("{} has no {side} participant", path.display())]
    MissingParticipant {
        path: PathBuf,
        side: Side,
    },
}

/// Declared match start, as stored in the document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeclaredStart {
    Epoch(i64),
    Text(String),
    /// Any other JSON value; treated the same as an absent field.
    Other(serde_json::Value),
}

impl DeclaredStart {
    /// Resolves the declared start to epoch seconds.
    ///
    /// Returns `None` for non-positive epochs, empty or unparsable text and
    /// unrecognised values.
    #[must_use]
    pub fn epoch_secs(&self) -> Option<i64> {
        match self {
            DeclaredStart::Epoch(secs) => (*secs > 0).then_some(*secs),
            DeclaredStart::Text(text) => DateTime::parse_from_str(text, DECLARED_START_FORMAT)
                .ok()
                .map(|dt| dt.timestamp()),
            DeclaredStart::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTranscript {
    p1: Option<String>,
    p2: Option<String>,
    #[serde(default)]
    log: Vec<String>,
    winner: Option<String>,
    turns: Option<u32>,
    timestamp: Option<DeclaredStart>,
}

/// A transcript whose required fields are present.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub p1: String,
    pub p2: String,
    pub log: Vec<String>,
    /// Winner identity, empty if undeclared.
    pub winner: String,
    /// Declared turn count, 0 if undeclared.
    pub turns: u32,
    pub declared_start: Option<DeclaredStart>,
}

impl Transcript {
    /// Reads and validates the transcript at `path`.
    pub fn open<P>(path: P) -> Result<Self, TranscriptError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TranscriptError::Open {
            path: path.to_owned(),
            source,
        })?;
        let raw = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            TranscriptError::Decode {
                path: path.to_owned(),
                source,
            }
        })?;
        Self::from_raw(path, raw)
    }

    /// Validates a transcript held in memory. `path` is used for diagnostics only.
    pub fn from_json_str(path: &Path, json: &str) -> Result<Self, TranscriptError> {
        let raw = serde_json::from_str(json).map_err(|source| TranscriptError::Decode {
            path: path.to_owned(),
            source,
        })?;
        Self::from_raw(path, raw)
    }

    fn from_raw(path: &Path, raw: RawTranscript) -> Result<Self, TranscriptError> {
        let missing = |side| TranscriptError::MissingParticipant {
            path: path.to_owned(),
            side,
        };
        Ok(Self {
            p1: raw.p1.ok_or_else(|| missing(Side::P1))?,
            p2: raw.p2.ok_or_else(|| missing(Side::P2))?,
            log: raw.log,
            winner: raw.winner.unwrap_or_default(),
            turns: raw.turns.unwrap_or_default(),
            declared_start: raw.timestamp,
        })
    }

    #[must_use]
    pub fn participant(&self, side: Side) -> &str {
        match side {
            Side::P1 => &self.p1,
            Side::P2 => &self.p2,
        }
    }

    /// Epoch-second timestamps carried by tagged event-log entries, in log order.
    #[must_use]
    pub fn event_timestamps(&self, tag: &str) -> Vec<i64> {
        extract_timestamps(&self.log, tag)
    }

    /// Authoritative start time of the match.
    ///
    /// The declared start wins when it resolves; otherwise the earliest
    /// event timestamp is used.
    #[must_use]
    pub fn start_timestamp(&self, event_timestamps: &[i64]) -> Option<i64> {
        self.declared_start
            .as_ref()
            .and_then(DeclaredStart::epoch_secs)
            .or_else(|| event_timestamps.iter().copied().min())
    }
}

/// Parses an entry such as `|t:|1759276763`; entries without `tag` yield `None`.
#[must_use]
pub fn parse_timestamp_entry(entry: &str, tag: &str) -> Option<i64> {
    let rest = entry.strip_prefix(tag)?;
    let value = rest.split(tag).next().unwrap_or(rest);
    value.trim().parse().ok()
}

#[must_use]
pub fn extract_timestamps<S>(log: &[S], tag: &str) -> Vec<i64>
where
    S: AsRef<str>,
{
    log.iter()
        .filter_map(|entry| parse_timestamp_entry(entry.as_ref(), tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: &str = "|t:|";

    fn parse(json: &str) -> Result<Transcript, TranscriptError> {
        Transcript::from_json_str(Path::new("test.log.json"), json)
    }

    #[test]
    fn test_extracts_only_tagged_entries() {
        let log = [
            "|player|p1|Alice",
            "|t:|100",
            "|turn|1",
            "|t:|110",
            "|t:|garbage",
            "|chat|Bob||t:|999",
            "|t:|125",
        ];
        assert_eq!(extract_timestamps(&log, TAG), [100, 110, 125]);
    }

    #[test]
    fn test_timestamp_entry_edge_cases() {
        assert_eq!(parse_timestamp_entry("|t:| 42 ", TAG), Some(42));
        assert_eq!(parse_timestamp_entry("|t:|42|t:|43", TAG), Some(42));
        assert_eq!(parse_timestamp_entry("|t:|", TAG), None);
        assert_eq!(parse_timestamp_entry("t:|42", TAG), None);
    }

    #[test]
    fn test_optional_fields_default() {
        let transcript = parse(r#"{"p1": "Alice", "p2": "Bob"}"#).unwrap();
        assert!(transcript.log.is_empty());
        assert_eq!(transcript.winner, "");
        assert_eq!(transcript.turns, 0);
        assert!(transcript.declared_start.is_none());
    }

    #[test]
    fn test_missing_participant_is_typed_failure() {
        let err = parse(r#"{"p1": "Alice", "log": []}"#).unwrap_err();
        assert!(matches!(
            err,
            TranscriptError::MissingParticipant { side: Side::P2, .. }
        ));
    }

    #[test]
    fn test_malformed_document_is_decode_failure() {
        let err = parse(r#"{"p1": "Alice", "p2": "#).unwrap_err();
        assert!(matches!(err, TranscriptError::Decode { .. }));
        let err = parse(r#"{"p1": "Alice", "p2": "Bob", "log": "nope"}"#).unwrap_err();
        assert!(matches!(err, TranscriptError::Decode { .. }));
    }

    #[test]
    fn test_declared_epoch_start() {
        let transcript = parse(r#"{"p1": "A", "p2": "B", "timestamp": 1759276800}"#).unwrap();
        assert_eq!(transcript.start_timestamp(&[5, 1]), Some(1_759_276_800));
    }

    #[test]
    fn test_declared_text_start() {
        let transcript = parse(
            r#"{"p1": "A", "p2": "B",
                "timestamp": "Wed Oct 01 2025 00:00:00 GMT+0000 (Coordinated Universal Time)"}"#,
        )
        .unwrap();
        assert_eq!(transcript.start_timestamp(&[]), Some(1_759_276_800));
    }

    #[test]
    fn test_unparsable_start_falls_back_to_earliest_event() {
        for declared in [r#""not a date""#, "0", r#""""#, "null", "[1]"] {
            let json = format!(r#"{{"p1": "A", "p2": "B", "timestamp": {declared}}}"#);
            let transcript = parse(&json).unwrap();
            assert_eq!(transcript.start_timestamp(&[30, 10, 20]), Some(10), "{declared}");
            assert_eq!(transcript.start_timestamp(&[]), None, "{declared}");
        }
    }
}
