// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand implementations.

use crate::cli::{ExtractArgs, ProbeArgs, ReportFormat, RunArgs};
use crate::env;
use crate::output_diagnostic::print_warning;
use crate::report::{write_json, write_text, SuiteSummary};
use crate::suite::{Suite, SuiteError};
use flagprobe_harness::{
    find_flag, CapabilityProbe, EnvProbe, FlagDescriptor, FlagType, FlagValue, LaunchLog,
    ParseError, ScenarioRunner, StaticProbe, Verdict,
};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

/// Process exit codes
pub mod exit_codes {
    /// Every scenario passed or was skipped
    pub const SUCCESS: i32 = 0;
    /// At least one iteration failed
    pub const FAILED: i32 = 1;
    /// Invalid suite file or command line
    pub const USAGE: i32 = 2;
}

/// Capabilities from `--capability` plus `FLAGPROBE_CAPABILITIES`
fn command_line_probe(capabilities: &[String]) -> StaticProbe {
    let mut probe = StaticProbe::new(capabilities.iter().cloned());
    if let Some(list) = env::capabilities() {
        probe.extend(&EnvProbe::parse(&list).into_static());
    }
    probe
}

/// Run a suite file and write its report; returns the process exit code.
pub async fn run<W: Write>(args: &RunArgs, out: &mut W) -> Result<i32, SuiteError> {
    let suite = Suite::load(&args.suite)?;
    if suite.scenarios.is_empty() {
        print_warning(format_args!("Suite '{}' has no scenarios", suite.name));
    }

    let mut probe = suite.capabilities.clone();
    probe.extend(&command_line_probe(&args.capabilities));

    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .or(suite.timeout)
        .or_else(env::timeout);

    let log = match args.launch_log {
        Some(ref path) => {
            let log = LaunchLog::with_file(path).map_err(|source| SuiteError::LaunchLog {
                path: path.display().to_string(),
                source,
            })?;
            Some(log)
        }
        None => None,
    };

    let launcher = suite.launcher(args.executable.as_deref(), timeout, log)?;
    tracing::info!(
        suite = %suite.name,
        executable = %launcher.executable().display(),
        scenarios = suite.scenarios.len(),
        capabilities = ?probe.names().collect::<Vec<_>>(),
        "running suite"
    );
    if probe.is_empty() {
        tracing::debug!("no capabilities supported, gated scenarios will be skipped");
    }

    let runner = ScenarioRunner::new(launcher, probe);
    let report = runner.run_all(&suite.scenarios).await;
    let summary = SuiteSummary::from_report(&suite.name, &report);

    let written = match args.format {
        ReportFormat::Text => write_text(out, &summary),
        ReportFormat::Json => write_json(out, &summary),
    };
    written.map_err(SuiteError::Report)?;

    Ok(match report.verdict() {
        Verdict::Failed => exit_codes::FAILED,
        Verdict::Passed | Verdict::Skipped => exit_codes::SUCCESS,
    })
}

/// Print which names are supported; exit code 0 only if all of them are.
pub fn probe<W: Write>(args: &ProbeArgs, out: &mut W) -> io::Result<i32> {
    let probe = command_line_probe(&args.capabilities);
    let mut all_supported = true;
    for name in &args.names {
        let supported = probe.is_supported(name);
        all_supported &= supported;
        let status = if supported {
            "supported"
        } else {
            "unsupported"
        };
        writeln!(out, "{}: {}", name, status)?;
    }
    Ok(if all_supported {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILED
    })
}

/// Extract a flag from report text.
///
/// Without `--type` the type is inferred from the line's type tag.
pub fn extract(args: &ExtractArgs, text: &str) -> Result<FlagValue, ParseError> {
    let flag_type = match args.flag_type {
        Some(flag_type) => flag_type,
        None => {
            let line = find_flag(&args.flag, text).ok_or_else(|| ParseError::PatternNotFound {
                flag: args.flag.clone(),
            })?;
            FlagType::from_type_tag(&line.type_tag)
        }
    };
    FlagDescriptor::new(&args.flag, flag_type).extract(text)
}

/// Read report text from `file`, or stdin when absent
pub fn read_report(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
