// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use flagprobe_harness::{
    CapturedOutput, IterationReport, ParseError, ScenarioError, ScenarioReport, SkipSignal,
};

fn report() -> SuiteReport {
    let output = CapturedOutput::new(1, "", "Error: flag must be at least 1\n");
    let failure = output.assertions().assert_exit_code(0).unwrap_err();

    SuiteReport {
        scenarios: vec![
            ScenarioReport {
                name: "sweep".to_string(),
                outcome: ScenarioOutcome::Ran(vec![IterationReport {
                    label: "flag=1".to_string(),
                    variant: Some("G1".to_string()),
                    result: Ok(()),
                }]),
            },
            ScenarioReport {
                name: "broken".to_string(),
                outcome: ScenarioOutcome::Ran(vec![
                    IterationReport {
                        label: "zero".to_string(),
                        variant: None,
                        result: Err(ScenarioError::Assertion(failure)),
                    },
                    IterationReport {
                        label: "missing".to_string(),
                        variant: None,
                        result: Err(ScenarioError::Parse(ParseError::PatternNotFound {
                            flag: "flag".to_string(),
                        })),
                    },
                ]),
            },
            ScenarioReport {
                name: "gated".to_string(),
                outcome: ScenarioOutcome::Skipped(SkipSignal::new("none of Z is supported")),
            },
        ],
    }
}

#[test]
fn test_summary_counts_and_verdicts() {
    let summary = SuiteSummary::from_report("suite", &report());

    assert_eq!(summary.verdict, "failed");
    assert_eq!((summary.passed, summary.failed, summary.skipped), (1, 1, 1));
    assert_eq!(summary.scenarios[0].verdict, "passed");
    assert_eq!(summary.scenarios[2].verdict, "skipped");
    assert_eq!(
        summary.scenarios[2].skip_reason.as_deref(),
        Some("none of Z is supported")
    );

    let missing = &summary.scenarios[1].iterations[1];
    assert!(!missing.passed);
    assert_eq!(
        missing.error.as_deref(),
        Some("No flag-report line found for flag 'flag'")
    );
}

#[test]
fn test_text_report() {
    let summary = SuiteSummary::from_report("suite", &report());
    let mut buf = Vec::new();
    write_text(&mut buf, &summary).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.starts_with("PASS  sweep\n  ok    flag=1 [G1]\nFAIL  broken\n  FAIL  zero\n"));
    assert!(text.contains("        Unexpected exit code: expected 0, actual 1\n"));
    assert!(text.contains("        Error: flag must be at least 1\n"));
    assert!(text.contains("SKIP  gated (none of Z is supported)\n"));
    assert!(text.ends_with("\nsuite: 3 scenarios, 1 passed, 1 failed, 1 skipped\n"));
}

#[test]
fn test_json_report_round_trips() {
    let summary = SuiteSummary::from_report("suite", &report());
    let mut buf = Vec::new();
    write_json(&mut buf, &summary).unwrap();

    let parsed: SuiteSummary = serde_json::from_slice(&buf).unwrap();
    assert_eq!(parsed, summary);

    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert!(value["scenarios"][0].get("skip_reason").is_none());
    assert_eq!(value["scenarios"][0]["iterations"][0]["variant"], "G1");
}

#[test]
fn test_empty_suite_text() {
    let summary = SuiteSummary::from_report("empty", &SuiteReport::default());
    let mut buf = Vec::new();
    write_text(&mut buf, &summary).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "\nempty: 0 scenarios, 0 passed, 0 failed, 0 skipped\n"
    );
}
