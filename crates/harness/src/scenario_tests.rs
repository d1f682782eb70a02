// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::probe::StaticProbe;
use crate::registry::LaunchLog;
use std::path::PathBuf;
use tempfile::TempDir;

/// Shell stand-in for a program that reports its flags.
///
/// `--set-flag=N` sets `flag` (0 is rejected with exit 1), `--use=X`
/// selects an engine which is echoed back as a string flag.
const FIXTURE: &str = r#"
flag=4
engine=none
for arg in "$@"; do
  case "$arg" in
    --set-flag=*) flag="${arg#--set-flag=}" ;;
    --use=*) engine="${arg#--use=}" ;;
  esac
done
if [ "$flag" = "0" ]; then
  echo "Error: flag must be at least 1" >&2
  exit 1
fi
echo "     uint flag      := $flag      {product} {command line}"
echo "    ccstr engine    = $engine     {product} {default}"
"#;

struct Fixture {
    _dir: TempDir,
    script: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("flags.sh");
    std::fs::write(&script, FIXTURE).unwrap();
    Fixture { _dir: dir, script }
}

fn runner(fixture: &Fixture, probe: StaticProbe, log: &LaunchLog) -> ScenarioRunner {
    let launcher = Launcher::new("/bin/sh")
        .with_base_args([fixture.script.to_string_lossy().to_string()])
        .with_log(log.clone());
    ScenarioRunner::new(launcher, probe)
}

fn args(list: &[&str]) -> ArgumentVector {
    ArgumentVector::new(list.iter().copied()).unwrap()
}

fn flag() -> FlagDescriptor {
    FlagDescriptor::int64("flag")
}

fn engine_variants(scenario: Scenario) -> Scenario {
    scenario
        .with_variant(Variant::new("G1", ["--use=G1"]))
        .with_variant(Variant::new("Parallel", ["--use=Parallel"]))
}

#[test]
fn test_require_any_keeps_supported_in_order() {
    let probe = StaticProbe::new(["Parallel", "G1"]);
    assert_eq!(
        require_any(&probe, &["G1", "Serial", "Parallel"]).unwrap(),
        vec!["G1".to_string(), "Parallel".to_string()]
    );
}

#[test]
fn test_require_any_skips_when_none_supported() {
    let probe = StaticProbe::default();
    let skip = require_any(&probe, &["G1", "Parallel"]).unwrap_err();
    assert_eq!(skip.reason, "none of G1/Parallel is supported");
}

#[tokio::test]
async fn test_skip_happens_before_any_launch() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::default(), &log);
    let scenario = engine_variants(Scenario::new("gated")).with_iteration(
        Iteration::new("default", args(&["--print"])).expect(Expectation::ExitCode(0)),
    );

    let report = runner.run(&scenario).await;

    assert_eq!(report.verdict(), Verdict::Skipped);
    assert!(matches!(report.outcome, ScenarioOutcome::Skipped(_)));
    assert!(report.iterations().is_empty());
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_rejected_zero_is_an_assertable_exit_code() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::default(), &log);
    let iteration =
        Iteration::new("zero", args(&["--set-flag=0"])).expect(Expectation::ExitCode(1));

    runner.run_iteration(&iteration, None).await.unwrap();
}

#[tokio::test]
async fn test_flag_echo_round_trip() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::default(), &log);
    let iteration = Iteration::new("three", args(&["--set-flag=3"]))
        .expect(Expectation::ExitCode(0))
        .expect(Expectation::FlagEquals {
            flag: flag(),
            value: FlagValue::Int(3),
        });

    runner.run_iteration(&iteration, None).await.unwrap();
}

#[tokio::test]
async fn test_sweep_runs_per_supported_variant() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::new(["Parallel"]), &log);
    let sweep = Iteration::sweep(
        &flag(),
        "--set-flag={value}",
        (1..=3).map(FlagValue::Int),
        &["--print".to_string()],
    );
    let scenario = engine_variants(Scenario::new("sweep")).with_iterations(sweep);

    let report = runner.run(&scenario).await;

    assert_eq!(report.verdict(), Verdict::Passed);
    let labels: Vec<&str> = report.iterations().iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["flag=1", "flag=2", "flag=3"]);
    assert!(report
        .iterations()
        .iter()
        .all(|i| i.variant.as_deref() == Some("Parallel")));

    let records = log.records();
    assert_eq!(records.len(), 3);
    assert_eq!(
        &records[0].args[1..],
        ["--use=Parallel", "--set-flag=1", "--print"]
    );
}

#[tokio::test]
async fn test_variant_args_reach_the_child() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::new(["G1", "Parallel"]), &log);
    let scenario = engine_variants(Scenario::new("engine")).with_iteration(
        Iteration::new("engine", args(&["--print"])).expect(Expectation::FlagNotEquals {
            flag: FlagDescriptor::string("engine"),
            value: FlagValue::from("none"),
        }),
    );

    let report = runner.run(&scenario).await;

    assert_eq!(report.verdict(), Verdict::Passed);
    assert_eq!(report.iterations().len(), 2);
    assert_eq!(log.len(), 2);
}

#[tokio::test]
async fn test_max_signed_32_value_round_trips() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::default(), &log);
    let iteration = Iteration::new("max", args(&["--set-flag=2147483647"])).expect(
        Expectation::FlagEquals {
            flag: flag(),
            value: FlagValue::Int(2_147_483_647),
        },
    );

    runner.run_iteration(&iteration, None).await.unwrap();
}

#[tokio::test]
async fn test_failures_do_not_stop_later_iterations() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::default(), &log);
    let scenario = Scenario::new("mixed")
        .with_iteration(
            Iteration::new("wrong", args(&["--set-flag=2"])).expect(Expectation::FlagEquals {
                flag: flag(),
                value: FlagValue::Int(5),
            }),
        )
        .with_iteration(
            Iteration::new("missing", args(&["--set-flag=2"])).expect(Expectation::FlagEquals {
                flag: FlagDescriptor::int64("NoSuchFlag"),
                value: FlagValue::Int(1),
            }),
        )
        .with_iteration(
            Iteration::new("right", args(&["--set-flag=2"])).expect(Expectation::FlagEquals {
                flag: flag(),
                value: FlagValue::Int(2),
            }),
        );

    let report = runner.run(&scenario).await;

    assert_eq!(report.verdict(), Verdict::Failed);
    assert_eq!(log.len(), 3);
    let results: Vec<_> = report.iterations().iter().map(|i| &i.result).collect();
    match results[0] {
        Err(ScenarioError::Assertion(failure)) => {
            assert_eq!(failure.actual, "Int(2)");
            assert!(failure.output.stdout().contains("uint flag"));
        }
        other => panic!("expected assertion failure, got {:?}", other),
    }
    assert!(matches!(
        results[1],
        Err(ScenarioError::Parse(ParseError::PatternNotFound { .. }))
    ));
    assert!(results[2].is_ok());
    assert_eq!(report.failures().count(), 2);
}

#[tokio::test]
async fn test_expectations_stop_at_first_violation() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::default(), &log);
    let iteration = Iteration::new("zero", args(&["--set-flag=0"]))
        .expect(Expectation::ExitCode(0))
        .expect(Expectation::OutputContains("never checked".to_string()));

    let err = runner.run_iteration(&iteration, None).await.unwrap_err();
    match err {
        ScenarioError::Assertion(failure) => {
            assert_eq!(failure.message, "Unexpected exit code");
            assert!(failure.output.stderr().contains("at least 1"));
        }
        other => panic!("expected assertion failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_launch_failure_is_reported() {
    let log = LaunchLog::new();
    let launcher = Launcher::new("/nonexistent/flagprobe-fixture").with_log(log.clone());
    let runner = ScenarioRunner::new(launcher, StaticProbe::default());
    let scenario = Scenario::new("broken")
        .with_iteration(Iteration::new("a", args(&["x"])).expect(Expectation::ExitCode(0)));

    let report = runner.run(&scenario).await;

    assert_eq!(report.verdict(), Verdict::Failed);
    assert!(matches!(
        report.iterations()[0].result,
        Err(ScenarioError::Launch(LaunchError::Startup { .. }))
    ));
}

#[tokio::test]
async fn test_iteration_timeout() {
    let log = LaunchLog::new();
    let launcher = Launcher::new("/bin/sh").with_log(log.clone());
    let runner = ScenarioRunner::new(launcher, StaticProbe::default());
    let iteration = Iteration::new("slow", args(&["-c", "exec sleep 30"]))
        .with_timeout(Some(Duration::from_millis(100)));

    let err = runner.run_iteration(&iteration, None).await.unwrap_err();
    assert!(matches!(err, ScenarioError::Launch(ref e) if e.is_timeout()));
    assert_eq!(log.find_timeouts().len(), 1);
}

#[tokio::test]
async fn test_suite_report_counts() {
    let fixture = fixture();
    let log = LaunchLog::new();
    let runner = runner(&fixture, StaticProbe::new(["G1"]), &log);
    let ok = Iteration::new("ok", args(&["--print"]))
        .expect(Expectation::ExitCode(0));
    let bad = Iteration::new("bad", args(&["--print"]))
        .expect(Expectation::ExitCode(9));
    let scenarios = vec![
        Scenario::new("pass").with_iteration(ok),
        Scenario::new("fail").with_iteration(bad),
        Scenario::new("skip")
            .with_variant(Variant::new("Z", ["--use=Z"]))
            .with_iteration(Iteration::new("never", args(&["--print"]))),
    ];

    let report = runner.run_all(&scenarios).await;

    assert_eq!(report.passed(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.verdict(), Verdict::Failed);
    assert_eq!(log.len(), 2);
}

#[test]
fn test_suite_verdicts() {
    let skipped = || ScenarioReport {
        name: "s".to_string(),
        outcome: ScenarioOutcome::Skipped(SkipSignal::new("n/a")),
    };
    let passed = || ScenarioReport {
        name: "p".to_string(),
        outcome: ScenarioOutcome::Ran(vec![]),
    };

    assert_eq!(SuiteReport::default().verdict(), Verdict::Passed);
    assert_eq!(
        SuiteReport {
            scenarios: vec![skipped(), skipped()]
        }
        .verdict(),
        Verdict::Skipped
    );
    assert_eq!(
        SuiteReport {
            scenarios: vec![skipped(), passed()]
        }
        .verdict(),
        Verdict::Passed
    );
}
