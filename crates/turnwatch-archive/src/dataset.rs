//! Per-player collection of match records.
//!
//! # Serialization
//!
//! The dataset serializes as a JSON object keyed by player identity:
//!
//! ```json
//! {
//!   "Alice": [
//!     {
//!       "opponent": "PAC-MM-Gen1",
//!       "avg_decision_time": 13.33,
//!       "battle_timestamp": 1759276800,
//!       "turns": 24,
//!       "winner": "Alice",
//!       "battle_id": "gen1ou-2412",
//!       "log_file": "logs/2025-10/gen1ou/2025-10-01/gen1ou-2412.log.json"
//!     }
//!   ]
//! }
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::record::MatchRecord;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("failed to open dataset {}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("failed to parse dataset {}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("record {match_id} of {player} has no positive decision time")]
    InvalidRecord { player: String, match_id: String },
    #[display("record {match_id} of {player} appears more than once")]
    DuplicateRecord { player: String, match_id: String },
}

/// Match records grouped by target identity.
///
/// Identities are grouped case-insensitively and stored under the casing
/// first observed. Within one player, match ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedDataset {
    players: BTreeMap<String, Vec<MatchRecord>>,
    /// Lowercased identity to stored key
    canonical: HashMap<String, String>,
}

impl AggregatedDataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to its player's bucket.
    ///
    /// Returns `false`, leaving the dataset unchanged, if the bucket
    /// already holds a record with the same match id.
    pub fn insert(&mut self, record: MatchRecord) -> bool {
        let key = self
            .canonical
            .entry(record.target_identity.to_lowercase())
            .or_insert_with(|| record.target_identity.clone())
            .clone();
        let bucket = self.players.entry(key.clone()).or_default();
        if bucket.iter().any(|r| r.match_id == record.match_id) {
            return false;
        }
        bucket.push(MatchRecord {
            target_identity: key,
            ..record
        });
        true
    }

    /// Orders every player's records by match start, then match id.
    pub fn sort_chronologically(&mut self) {
        for records in self.players.values_mut() {
            records.sort_by(|a, b| {
                a.match_timestamp
                    .cmp(&b.match_timestamp)
                    .then_with(|| a.match_id.cmp(&b.match_id))
            });
        }
    }

    /// Looks up a player's records, case-insensitively.
    #[must_use]
    pub fn records(&self, player: &str) -> Option<&[MatchRecord]> {
        let key = self.canonical.get(&player.to_lowercase())?;
        self.players.get(key).map(Vec::as_slice)
    }

    pub fn players(&self) -> impl Iterator<Item = (&str, &[MatchRecord])> {
        self.players
            .iter()
            .map(|(player, records)| (player.as_str(), records.as_slice()))
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn num_records(&self) -> usize {
        self.players.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Drops the listed players (case-insensitive). Returns how many were removed.
    pub fn exclude_players<I, S>(&mut self, players: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        for player in players {
            if let Some(key) = self.canonical.remove(&player.as_ref().to_lowercase()) {
                self.players.remove(&key);
                removed += 1;
            }
        }
        removed
    }

    /// Reads a dataset written by [`Serialize`].
    pub fn open<P>(path: P) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_owned(),
            source,
        })?;
        let players: BTreeMap<String, Vec<MatchRecord>> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                DatasetError::Decode {
                    path: path.to_owned(),
                    source,
                }
            })?;
        Self::from_players(players)
    }

    /// Rebuilds a dataset from its serialized form, restoring each record's identity.
    pub fn from_players(players: BTreeMap<String, Vec<MatchRecord>>) -> Result<Self, DatasetError> {
        let mut dataset = Self::new();
        for (player, records) in players {
            for record in records {
                if !record.is_valid() {
                    return Err(DatasetError::InvalidRecord {
                        player,
                        match_id: record.match_id,
                    });
                }
                let match_id = record.match_id.clone();
                let inserted = dataset.insert(MatchRecord {
                    target_identity: player.clone(),
                    ..record
                });
                if !inserted {
                    return Err(DatasetError::DuplicateRecord { player, match_id });
                }
            }
        }
        Ok(dataset)
    }
}

impl Serialize for AggregatedDataset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.players.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AggregatedDataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let players = BTreeMap::<String, Vec<MatchRecord>>::deserialize(deserializer)?;
        Self::from_players(players).map_err(serde::de::Error::custom)
    }
}
