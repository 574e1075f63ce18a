//! Log processing command
//!
//! Extracts average decision times from battle logs for the target players,
//! keeping only battles against bot opponents whose decision cadence is
//! known. The archive is only ever read; the single write is the output
//! dataset, produced after aggregation completes.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use turnwatch_archive::{
    aggregator::{Aggregator, PipelineReport},
    config::PipelineConfig,
    dataset::AggregatedDataset,
    date_window::DateWindow,
    guard,
};

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct ProcessArg {
    /// Target username(s) to analyze
    #[arg(long = "username", short = 'u', num_args = 1.., required = true)]
    pub(crate) usernames: Vec<String>,

    /// Battle format (archive category)
    #[arg(long, short = 'f', default_value = "gen1ou")]
    pub(crate) format: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) start: String,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub(crate) end: String,

    /// Path to the logs directory
    #[arg(long, default_value = "../logs")]
    pub(crate) logs_dir: PathBuf,

    /// Output JSON file path
    #[arg(long, short = 'o')]
    pub(crate) output: PathBuf,

    /// Name prefix identifying bot opponents (case-insensitive)
    #[arg(long, default_value = PipelineConfig::DEFAULT_OPPONENT_PREFIX)]
    pub(crate) opponent_prefix: String,

    /// Gaps between events of this many seconds or more are ignored
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MAX_GAP_SECS)]
    pub(crate) max_gap_secs: i64,
}

pub(crate) fn run(arg: &ProcessArg) -> anyhow::Result<()> {
    let window = DateWindow::parse(&arg.start, &arg.end)
        .context("Invalid date range, use YYYY-MM-DD")?;

    if !arg.logs_dir.is_dir() {
        bail!("Logs directory not found: {}", arg.logs_dir.display());
    }
    guard::check_output_path(&arg.output, &arg.logs_dir)
        .context("Refusing to write the output file into the logs directory")?;

    let config = PipelineConfig {
        max_gap_secs: arg.max_gap_secs,
        opponent_prefix: arg.opponent_prefix.clone(),
        ..PipelineConfig::default()
    };

    println!("Processing logs for: {}", arg.usernames.join(", "));
    println!("Format: {}", arg.format);
    println!("Date range: {} to {}", window.start(), window.end());
    println!("Filtering for battles vs {}* bots\n", config.opponent_prefix);

    let aggregator = Aggregator::new(&arg.logs_dir, &arg.format, &arg.usernames, &config);
    let (dataset, report) = aggregator.run(&window);

    util::save_json_atomic(&dataset, &arg.output)?;

    println!("\nResults saved to: {}", arg.output.display());
    print_report(&dataset, &report);
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn print_report(dataset: &AggregatedDataset, report: &PipelineReport) {
    println!(
        "Files processed: {} ({} unreadable)",
        report.files_seen, report.parse_failures
    );
    println!(
        "Skipped: {} without target, {} vs non-bot, {} without timing data, {} without start time, {} duplicates",
        report.no_target,
        report.opponent_not_bot,
        report.no_estimate,
        report.no_start_time,
        report.duplicates
    );
    println!("Total users analyzed: {}", dataset.num_players());
    for (player, records) in dataset.players() {
        let overall =
            records.iter().map(|r| r.avg_decision_time).sum::<f64>() / records.len() as f64;
        println!(
            "  {player}: {} battles, avg decision time: {overall:.2}s",
            records.len()
        );
    }
}
