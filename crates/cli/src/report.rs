// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering of suite results.

use flagprobe_harness::{ScenarioOutcome, SuiteReport, Verdict};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Serializable summary of a suite run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub name: String,
    pub verdict: String,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub scenarios: Vec<ScenarioSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub verdict: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    pub iterations: Vec<IterationSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationSummary {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Passed => "passed",
        Verdict::Failed => "failed",
        Verdict::Skipped => "skipped",
    }
}

impl SuiteSummary {
    pub fn from_report(name: &str, report: &SuiteReport) -> Self {
        let scenarios = report
            .scenarios
            .iter()
            .map(|scenario| ScenarioSummary {
                name: scenario.name.clone(),
                verdict: verdict_label(scenario.verdict()).to_string(),
                skip_reason: match &scenario.outcome {
                    ScenarioOutcome::Skipped(skip) => Some(skip.reason.clone()),
                    ScenarioOutcome::Ran(_) => None,
                },
                iterations: scenario
                    .iterations()
                    .iter()
                    .map(|iteration| IterationSummary {
                        label: iteration.label.clone(),
                        variant: iteration.variant.clone(),
                        passed: iteration.result.is_ok(),
                        error: iteration.result.as_ref().err().map(|e| e.to_string()),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: name.to_string(),
            verdict: verdict_label(report.verdict()).to_string(),
            passed: report.passed(),
            failed: report.failed(),
            skipped: report.skipped(),
            scenarios,
        }
    }
}

/// Write a human-readable report
pub fn write_text<W: Write>(writer: &mut W, summary: &SuiteSummary) -> io::Result<()> {
    for scenario in &summary.scenarios {
        let tag = match scenario.verdict.as_str() {
            "passed" => "PASS",
            "failed" => "FAIL",
            _ => "SKIP",
        };
        match scenario.skip_reason {
            Some(ref reason) => writeln!(writer, "{}  {} ({})", tag, scenario.name, reason)?,
            None => writeln!(writer, "{}  {}", tag, scenario.name)?,
        }

        for iteration in &scenario.iterations {
            let variant = iteration
                .variant
                .as_ref()
                .map(|v| format!(" [{}]", v))
                .unwrap_or_default();
            let status = if iteration.passed { "ok  " } else { "FAIL" };
            writeln!(writer, "  {}  {}{}", status, iteration.label, variant)?;
            if let Some(ref error) = iteration.error {
                for line in error.lines() {
                    writeln!(writer, "        {}", line)?;
                }
            }
        }
    }

    let total = summary.passed + summary.failed + summary.skipped;
    writeln!(
        writer,
        "\n{}: {} scenario{}, {} passed, {} failed, {} skipped",
        summary.name,
        total,
        if total == 1 { "" } else { "s" },
        summary.passed,
        summary.failed,
        summary.skipped
    )
}

/// Write the summary as pretty-printed JSON
pub fn write_json<W: Write>(writer: &mut W, summary: &SuiteSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
