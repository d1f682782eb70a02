// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface for the `flagprobe` runner.

use clap::{Args, Parser, Subcommand, ValueEnum};
use flagprobe_harness::FlagType;
use std::path::PathBuf;

/// Verify the effective flags of a child process
#[derive(Parser, Debug)]
#[command(name = "flagprobe", version, about = "Flag verification harness")]
pub struct Cli {
    /// Log launches and scenario progress at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a suite file against an executable
    Run(RunArgs),

    /// Report which capabilities are supported
    Probe(ProbeArgs),

    /// Extract a flag value from a flag report
    Extract(ExtractArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Suite file (TOML, or JSON when the extension is `.json`)
    #[arg(value_name = "SUITE")]
    pub suite: PathBuf,

    /// Executable to launch, overriding the suite's `executable`
    #[arg(long, short = 'e')]
    pub executable: Option<PathBuf>,

    /// Per-launch timeout in milliseconds, overriding the suite's `timeout_ms`
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Capability to report as supported (can be specified multiple times)
    #[arg(long = "capability", value_name = "NAME")]
    pub capabilities: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Append one JSON line per launch to this file
    #[arg(long, value_name = "PATH")]
    pub launch_log: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Capability to report as supported (can be specified multiple times)
    #[arg(long = "capability", value_name = "NAME")]
    pub capabilities: Vec<String>,

    /// Capabilities to check
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Flag name to look up
    #[arg(value_name = "FLAG")]
    pub flag: String,

    /// Expected type; inferred from the report line when omitted
    #[arg(long = "type", value_name = "TYPE")]
    pub flag_type: Option<FlagType>,

    /// Flag report to read; stdin when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON summary
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
