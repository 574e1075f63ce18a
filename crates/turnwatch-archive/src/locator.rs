//! Enumeration of candidate transcript files in a date-partitioned archive.
//!
//! The archive layout is `root/YYYY-MM/category/YYYY-MM-DD/*.suffix`. Days
//! without a directory are skipped: archives are allowed to have gaps.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use glob::Pattern;

use crate::date_window::{self, DATE_FORMAT, DateWindow};

#[derive(Debug, Clone)]
pub struct ArchiveLocator {
    root: PathBuf,
    category: String,
    suffix: String,
}

impl ArchiveLocator {
    pub fn new<P>(root: P, category: impl Into<String>, suffix: impl Into<String>) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            root: root.into(),
            category: category.into(),
            suffix: suffix.into(),
        }
    }

    /// Lazily yields every transcript path in `window`, day by day.
    ///
    /// Within a day, paths are in lexicographic order.
    pub fn candidates(&self, window: &DateWindow) -> impl Iterator<Item = PathBuf> + '_ {
        window.days().flat_map(|day| self.day_files(day))
    }

    /// Lists the transcript files of a single day.
    #[must_use]
    pub fn day_files(&self, day: NaiveDate) -> Vec<PathBuf> {
        let dir = date_window::partition_dir(&self.root, &self.category, day);
        if !dir.is_dir() {
            tracing::debug!("Directory not found: {}", dir.display());
            return vec![];
        }

        let pattern = Path::new(&Pattern::escape(&dir.to_string_lossy()))
            .join(format!("*{}", Pattern::escape(&self.suffix)));
        let entries = match glob::glob(&pattern.to_string_lossy()) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Invalid transcript pattern {}: {e}", pattern.display());
                return vec![];
            }
        };

        let mut files = entries
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {e}");
                    None
                }
            })
            .collect::<Vec<_>>();
        files.sort();

        tracing::debug!(
            "Processing {} files from {}...",
            files.len(),
            day.format(DATE_FORMAT)
        );
        files
    }
}
