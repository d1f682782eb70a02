// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Child-process flag verification harness.
//!
//! Launches a program with a controlled argument vector, captures its exit
//! code and output, extracts flag values from flag-report lines such as
//! `uint ParallelGCThreads := 4 {product}`, and checks them against
//! expectations. Scenarios whose required capabilities are missing are
//! skipped rather than failed.

mod assert;
mod flags;
mod launch;
mod output;
mod probe;
mod registry;
mod scenario;

pub use assert::{AssertionFailure, Assertions};
pub use flags::{find_flag, flag_value, FlagDescriptor, FlagLine, FlagType, FlagValue, ParseError};
pub use launch::{ArgumentVector, LaunchError, Launcher};
pub use output::{CapturedOutput, Stream};
pub use probe::{CapabilityProbe, EnvProbe, StaticProbe};
pub use registry::{LaunchLog, LaunchOutcome, LaunchRecord};
pub use scenario::{
    require_any, Expectation, Iteration, IterationReport, Scenario, ScenarioError,
    ScenarioOutcome, ScenarioReport, ScenarioRunner, SkipSignal, SuiteReport, Variant, Verdict,
};
