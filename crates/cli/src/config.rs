// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite configuration types for TOML/JSON suite files.

use flagprobe_harness::{FlagType, FlagValue};
use serde::{Deserialize, Serialize};

/// Top-level suite configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Name for reporting
    #[serde(default)]
    pub name: String,

    /// Program to launch; `--executable` overrides it
    #[serde(default)]
    pub executable: Option<String>,

    /// Arguments placed before every launch's own arguments
    #[serde(default)]
    pub base_args: Vec<String>,

    /// Per-launch timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Capabilities the environment is known to support
    #[serde(default)]
    pub capabilities: Vec<String>,

    #[serde(default)]
    pub scenarios: Vec<ScenarioSpec>,
}

/// One scenario: optional capability variants plus iterations and sweeps
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSpec {
    pub name: String,

    /// When non-empty, iterations run once per supported variant and the
    /// scenario is skipped if none is supported
    #[serde(default)]
    pub variants: Vec<VariantSpec>,

    #[serde(default)]
    pub iterations: Vec<IterationSpec>,

    #[serde(default)]
    pub sweeps: Vec<SweepSpec>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VariantSpec {
    pub capability: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// A single launch and its checks
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IterationSpec {
    /// Defaults to the joined arguments
    #[serde(default)]
    pub label: Option<String>,

    pub args: Vec<String>,

    #[serde(default)]
    pub expect_exit: Option<i32>,

    #[serde(default)]
    pub flags: Vec<FlagCheckSpec>,

    /// Text that must appear in stdout or stderr
    #[serde(default)]
    pub output_contains: Vec<String>,

    #[serde(default)]
    pub output_not_contains: Vec<String>,

    /// Overrides the suite timeout for this launch
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Check on one flag's reported value
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FlagCheckSpec {
    pub name: String,

    /// Inferred from `equals`/`not_equals` when omitted
    #[serde(default, rename = "type")]
    pub flag_type: Option<FlagType>,

    #[serde(default)]
    pub equals: Option<FlagValue>,

    #[serde(default)]
    pub not_equals: Option<FlagValue>,
}

/// Sets a flag to each value in turn and expects it to read back unchanged
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SweepSpec {
    pub flag: String,

    #[serde(default, rename = "type")]
    pub flag_type: FlagType,

    /// Argument setting the flag; `{value}` is replaced by each value
    pub arg_template: String,

    pub values: Vec<FlagValue>,

    /// Arguments following the templated one
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Exit code expected before the flag is read (default: 0)
    #[serde(default)]
    pub expect_exit: Option<i32>,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
