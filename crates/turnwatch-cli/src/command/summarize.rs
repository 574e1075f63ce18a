//! Dataset summary command
//!
//! Prints per-player statistics for a dataset produced by `process` and
//! optionally exports the derived series (outlier-filtered decision times
//! and their moving average) for a chart renderer.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use serde::Serialize;
use turnwatch_archive::{dataset::AggregatedDataset, summary::PlayerSummary, views::PlayerSeries};
use turnwatch_stats::outliers::OutlierRule;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct SummarizeArg {
    /// Dataset JSON file produced by the `process` command
    pub(crate) input: PathBuf,

    /// Usernames to leave out (case-insensitive)
    #[arg(long, num_args = 0..)]
    pub(crate) exclude: Vec<String>,

    /// Remove outliers using the IQR method before deriving series
    #[arg(long)]
    pub(crate) remove_outliers: bool,

    /// IQR multiplier for outlier removal
    #[arg(long, default_value_t = OutlierRule::DEFAULT_FACTOR)]
    pub(crate) outlier_factor: f64,

    /// Window size for the moving average (0 = disabled)
    #[arg(long, default_value_t = 0)]
    pub(crate) moving_average: usize,

    /// Write the derived series to this JSON file
    #[arg(long)]
    pub(crate) series_output: Option<PathBuf>,
}

/// Derived series of one player, in chronological order.
#[derive(Debug, Serialize)]
struct SeriesExport {
    battle_timestamps: Vec<i64>,
    avg_decision_times: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moving_average: Option<Vec<f64>>,
}

pub(crate) fn run(arg: &SummarizeArg) -> anyhow::Result<()> {
    let mut dataset = AggregatedDataset::open(&arg.input)
        .with_context(|| format!("Failed to load dataset: {}", arg.input.display()))?;
    if dataset.is_empty() {
        bail!("No data found in input file: {}", arg.input.display());
    }

    let excluded = dataset.exclude_players(&arg.exclude);
    if excluded > 0 {
        println!("Excluded {excluded} username(s)");
    }

    let rule = OutlierRule::new(arg.outlier_factor);
    if arg.remove_outliers {
        println!("Outliers removed using IQR method (factor={})", rule.factor);
    }

    let series = derive_series(&dataset, arg.remove_outliers.then_some(&rule), arg.moving_average);

    println!("{}", "=".repeat(80));
    println!("STATISTICAL SUMMARY");
    println!("{}", "=".repeat(80));
    for (player, records) in dataset.players() {
        if let Some(summary) = PlayerSummary::from_records(player, records) {
            println!();
            print!("{summary}");
        }
        let kept = series
            .get(player)
            .map_or(records.len(), |export| export.battle_timestamps.len());
        if kept != records.len() {
            println!(
                "  Series points after outlier removal: {kept}/{}",
                records.len()
            );
        }
    }
    println!("{}", "=".repeat(80));

    if let Some(path) = &arg.series_output {
        util::save_json_atomic(&series, path)?;
        println!("Series saved to: {}", path.display());
    }
    Ok(())
}

fn derive_series<'a>(
    dataset: &'a AggregatedDataset,
    outliers: Option<&OutlierRule>,
    moving_average: usize,
) -> BTreeMap<&'a str, SeriesExport> {
    dataset
        .players()
        .filter(|(_, records)| !records.is_empty())
        .map(|(player, records)| {
            let mut series = PlayerSeries::from_records(records);
            if let Some(rule) = outliers {
                series = series.without_outliers(rule);
            }
            let moving_average = (moving_average > 0).then(|| series.moving_average(moving_average));
            let export = SeriesExport {
                battle_timestamps: series.timestamps,
                avg_decision_times: series.avg_decision_times,
                moving_average,
            };
            (player, export)
        })
        .collect()
}
