// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;
use std::thread;

fn exited(code: i32) -> LaunchOutcome {
    LaunchOutcome::Exited { exit_code: code }
}

fn record(log: &LaunchLog, arg: &str, outcome: LaunchOutcome) {
    log.record(
        Some(42),
        "/bin/prog",
        vec![arg.to_string()],
        Duration::from_millis(5),
        outcome,
    );
}

#[test]
fn test_record_and_retrieve() {
    let log = LaunchLog::new();
    assert!(log.is_empty());

    record(&log, "--set-flag=1", exited(0));

    assert_eq!(log.len(), 1);
    let records = log.records();
    assert_eq!(records[0].seq, 0);
    assert_eq!(records[0].pid, Some(42));
    assert_eq!(records[0].args, vec!["--set-flag=1".to_string()]);
    assert_eq!(records[0].elapsed_ms, 5);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(4)]
fn test_sequence_numbers(#[case] total: u64) {
    let log = LaunchLog::new();
    for i in 0..total {
        record(&log, &format!("--n={}", i), exited(0));
    }

    let seqs: Vec<u64> = log.records().iter().map(|r| r.seq).collect();
    assert_eq!(seqs, (0..total).collect::<Vec<_>>());
    assert_eq!(log.last().map(|r| r.seq), total.checked_sub(1));
}

#[test]
fn test_count_and_timeouts() {
    let log = LaunchLog::new();
    record(&log, "a", exited(0));
    record(&log, "b", exited(1));
    record(&log, "c", LaunchOutcome::TimedOut { timeout_ms: 100 });

    assert_eq!(
        log.count(|r| matches!(r.outcome, LaunchOutcome::Exited { .. })),
        2
    );
    let timeouts = log.find_timeouts();
    assert_eq!(timeouts.len(), 1);
    assert_eq!(timeouts[0].args, vec!["c".to_string()]);
}

#[test]
fn test_clones_share_records() {
    let log = LaunchLog::new();
    let clone = log.clone();

    record(&clone, "a", exited(0));
    assert_eq!(log.len(), 1);

    log.clear();
    assert!(clone.is_empty());
}

#[test]
fn test_concurrent_recording() {
    let log = LaunchLog::new();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let log = log.clone();
            thread::spawn(move || record(&log, &i.to_string(), exited(0)))
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let mut seqs: Vec<u64> = log.records().iter().map(|r| r.seq).collect();
    seqs.sort_unstable();
    assert_eq!(seqs, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_with_file_writes_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("launches.jsonl");
    let log = LaunchLog::with_file(&path).unwrap();

    record(&log, "a", exited(3));
    record(
        &log,
        "b",
        LaunchOutcome::StartupFailed {
            reason: "not found".to_string(),
        },
    );

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["outcome"]["kind"], "exited");
    assert_eq!(first["outcome"]["exit_code"], 3);

    let second: LaunchRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.seq, 1);
    assert!(matches!(second.outcome, LaunchOutcome::StartupFailed { .. }));
}

#[test]
fn test_uptime_advances() {
    let log = LaunchLog::new();
    let first = log.uptime();
    thread::sleep(Duration::from_millis(5));
    assert!(log.uptime() > first);
}

#[test]
fn test_failed_outcome_serializes_with_reason() {
    let outcome = LaunchOutcome::Failed {
        reason: "pipe closed".to_string(),
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["kind"], "failed");
    assert_eq!(json["reason"], "pipe closed");
    let parsed: LaunchOutcome = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, outcome);
}

#[rstest]
#[case(Duration::from_millis(300), 300)]
#[case(Duration::from_micros(1_999), 1)]
#[case(Duration::MAX, u64::MAX)]
fn test_millis_saturates(#[case] duration: Duration, #[case] expected: u64) {
    assert_eq!(millis(duration), expected);
}
