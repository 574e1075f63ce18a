//! Decision-time extraction from archived match transcripts
//!
//! This crate walks a date-partitioned archive of turn-based match
//! transcripts, keeps the matches a target player played against a
//! bot-class opponent, estimates the player's average decision time from
//! the timestamps embedded in each event log, and groups the results into
//! a per-player dataset.
//!
//! # Overview
//!
//! The pipeline is a sequential fold over candidate files:
//!
//! 1. **Locate** ([`locator::ArchiveLocator`]): enumerate
//!    `root/YYYY-MM/category/YYYY-MM-DD/*.log.json` for every day of a
//!    [`date_window::DateWindow`]
//! 2. **Parse** ([`transcript::Transcript`]): decode a transcript and extract
//!    its event timestamps
//! 3. **Filter** ([`filter::MatchFilter`]): find the target side and require a
//!    bot-class opponent
//! 4. **Estimate** ([`estimator::DecisionTimeEstimator`]): mean gap between
//!    consecutive events inside the validity window
//! 5. **Aggregate** ([`aggregator::Aggregator`]): collect
//!    [`record::MatchRecord`]s into an [`dataset::AggregatedDataset`]
//!
//! Consumers read the dataset back with [`dataset::AggregatedDataset::open`]
//! and derive read-only views with [`views::PlayerSeries`] and
//! [`summary::PlayerSummary`].
//!
//! Parameters such as the gap ceiling and the bot prefix live in
//! [`config::PipelineConfig`] and are handed to each component at
//! construction.
//!
//! # Example
//!
//! ```no_run
//! use turnwatch_archive::{
//!     aggregator::Aggregator, config::PipelineConfig, date_window::DateWindow,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let window = DateWindow::parse("2025-10-01", "2025-10-15")?;
//! let aggregator = Aggregator::new("logs", "gen1ou", ["alice"], &PipelineConfig::default());
//! let (dataset, report) = aggregator.run(&window);
//!
//! println!("{} of {} files matched", report.matched, report.files_seen);
//! for (player, records) in dataset.players() {
//!     println!("{player}: {} battles", records.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod config;
pub mod dataset;
pub mod date_window;
pub mod estimator;
pub mod filter;
pub mod guard;
pub mod locator;
pub mod record;
pub mod summary;
pub mod transcript;
pub mod views;
