use std::{fs, path::Path};

use turnwatch_archive::{
    aggregator::Aggregator, config::PipelineConfig, dataset::AggregatedDataset,
    date_window::DateWindow,
};

fn write_transcript(dir: &Path, name: &str, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), body).unwrap();
}

fn battle(p1: &str, p2: &str, timestamps: &[i64]) -> String {
    let log = timestamps
        .iter()
        .map(|t| format!(r#""|t:|{t}""#))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"{{"p1": "{p1}", "p2": "{p2}", "winner": "{p1}", "turns": 3, "log": ["|start", {log}]}}"#
    )
}

fn run(root: &Path, targets: &[&str], start: &str, end: &str) -> AggregatedDataset {
    let window = DateWindow::parse(start, end).unwrap();
    let aggregator = Aggregator::new(root, "gen1ou", targets, &PipelineConfig::default());
    aggregator.run(&window).0
}

#[test]
fn single_day_keeps_only_target_vs_bot() {
    let root = tempfile::tempdir().unwrap();
    let day = root.path().join("2025-10/gen1ou/2025-10-01");
    let timestamps = [0, 10, 25, 40];
    write_transcript(&day, "gen1ou-1.log.json", &battle("Alice", "PAC-MM-Gen1", &timestamps));
    write_transcript(&day, "gen1ou-2.log.json", &battle("Alice", "Bob", &timestamps));
    write_transcript(&day, "gen1ou-3.log.json", &battle("Carol", "Dave", &timestamps));

    let dataset = run(root.path(), &["alice"], "2025-10-01", "2025-10-01");
    assert_eq!(dataset.num_players(), 1);
    let records = dataset.records("Alice").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].target_identity, "Alice");
    assert_eq!(records[0].match_id, "gen1ou-1");
    assert!((records[0].avg_decision_time - 13.33).abs() < 0.01);
}

#[test]
fn corrupt_transcript_does_not_abort_run() {
    let root = tempfile::tempdir().unwrap();
    let day1 = root.path().join("2025-10/gen1ou/2025-10-01");
    let day2 = root.path().join("2025-10/gen1ou/2025-10-02");
    write_transcript(&day1, "a.log.json", "{ this is not json");
    write_transcript(&day1, "b.log.json", &battle("Alice", "pac-mm-x", &[100, 105]));
    write_transcript(&day2, "c.log.json", r#"{"p1": "Alice"}"#);
    write_transcript(&day2, "d.log.json", &battle("pac-mm-y", "ALICE", &[200, 220]));

    let window = DateWindow::parse("2025-10-01", "2025-10-02").unwrap();
    let aggregator = Aggregator::new(root.path(), "gen1ou", ["alice"], &PipelineConfig::default());
    let (dataset, report) = aggregator.run(&window);

    assert_eq!(report.files_seen, 4);
    assert_eq!(report.parse_failures, 2);
    assert_eq!(report.matched, 2);
    let records = dataset.records("alice").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].avg_decision_time, 5.0);
    assert_eq!(records[1].avg_decision_time, 20.0);
}

#[test]
fn records_are_chronological_across_days() {
    let root = tempfile::tempdir().unwrap();
    let day1 = root.path().join("2025-09/gen1ou/2025-09-30");
    let day2 = root.path().join("2025-10/gen1ou/2025-10-01");
    // the later file name carries the earlier match
    write_transcript(&day1, "z.log.json", &battle("Alice", "PAC-MM-1", &[5000, 5010]));
    write_transcript(&day1, "a.log.json", &battle("Alice", "PAC-MM-1", &[1000, 1010]));
    write_transcript(&day2, "m.log.json", &battle("Alice", "PAC-MM-1", &[9000, 9030]));

    let dataset = run(root.path(), &["Alice"], "2025-09-01", "2025-10-31");
    let timestamps = dataset
        .records("alice")
        .unwrap()
        .iter()
        .map(|r| r.match_timestamp)
        .collect::<Vec<_>>();
    assert_eq!(timestamps, [1000, 5000, 9000]);
}

#[test]
fn rerun_is_byte_identical() {
    let root = tempfile::tempdir().unwrap();
    let day = root.path().join("2025-10/gen1ou/2025-10-01");
    for i in 0..5 {
        let start = 1000 * i;
        write_transcript(
            &day,
            &format!("gen1ou-{i}.log.json"),
            &battle("Alice", "PAC-MM-1", &[start, start + 7, start + 19]),
        );
        write_transcript(
            &day,
            &format!("gen1ou-b{i}.log.json"),
            &battle("PAC-MM-2", "Bob", &[start, start + 3]),
        );
    }

    let render = || {
        let dataset = run(root.path(), &["alice", "bob"], "2025-10-01", "2025-10-01");
        serde_json::to_string_pretty(&dataset).unwrap()
    };
    let first = render();
    let second = render();
    assert_eq!(first, second);

    let loaded: AggregatedDataset = serde_json::from_str(&first).unwrap();
    assert_eq!(loaded.num_records(), 10);
}

#[test]
fn empty_window_yields_empty_dataset() {
    let root = tempfile::tempdir().unwrap();
    let dataset = run(root.path(), &["alice"], "2025-10-01", "2025-10-07");
    assert!(dataset.is_empty());
}

#[test]
fn extreme_timestamps_do_not_abort_run() {
    let root = tempfile::tempdir().unwrap();
    let day = root.path().join("2025-10/gen1ou/2025-10-01");
    write_transcript(
        &day,
        "a.log.json",
        &battle("Alice", "PAC-MM-1", &[i64::MAX, i64::MIN + 50]),
    );
    write_transcript(&day, "b.log.json", &battle("Alice", "PAC-MM-1", &[100, 112]));

    let window = DateWindow::parse("2025-10-01", "2025-10-01").unwrap();
    let aggregator = Aggregator::new(root.path(), "gen1ou", ["alice"], &PipelineConfig::default());
    let (dataset, report) = aggregator.run(&window);

    assert_eq!(report.files_seen, 2);
    assert_eq!(report.no_estimate, 1);
    let records = dataset.records("alice").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].match_id, "b");
    assert_eq!(records[0].avg_decision_time, 12.0);
}
