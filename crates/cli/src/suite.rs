// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite loading, validation and conversion into harness scenarios.

use crate::config::{FlagCheckSpec, IterationSpec, ScenarioSpec, SuiteConfig, SweepSpec};
use flagprobe_harness::{
    ArgumentVector, Expectation, FlagDescriptor, FlagType, Iteration, LaunchLog, Launcher,
    Scenario, StaticProbe, Variant,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading a suite
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Failed to read suite file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),

    #[error("Failed to open launch log '{path}': {source}")]
    LaunchLog {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A validated suite ready to run
#[derive(Clone, Debug)]
pub struct Suite {
    pub name: String,
    pub executable: Option<PathBuf>,
    pub base_args: Vec<String>,
    pub timeout: Option<Duration>,
    pub capabilities: StaticProbe,
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    /// Load a suite from a TOML or JSON file
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: SuiteConfig = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        if config.name.is_empty() {
            config.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
        }
        Self::from_config(config)
    }

    /// Validate a config object and build its scenarios
    pub fn from_config(config: SuiteConfig) -> Result<Self, SuiteError> {
        let mut scenarios = Vec::with_capacity(config.scenarios.len());
        for spec in &config.scenarios {
            scenarios.push(build_scenario(spec)?);
        }

        Ok(Self {
            name: config.name,
            executable: config.executable.map(PathBuf::from),
            base_args: config.base_args,
            timeout: config.timeout_ms.map(Duration::from_millis),
            capabilities: StaticProbe::new(config.capabilities),
            scenarios,
        })
    }

    /// Build the launcher for this suite.
    ///
    /// `executable` and `timeout` override the suite's own values.
    pub fn launcher(
        &self,
        executable: Option<&Path>,
        timeout: Option<Duration>,
        log: Option<LaunchLog>,
    ) -> Result<Launcher, SuiteError> {
        let executable = executable
            .map(Path::to_path_buf)
            .or_else(|| self.executable.clone())
            .ok_or_else(|| {
                SuiteError::Validation(format!(
                    "Suite '{}' has no executable; set `executable` or pass --executable",
                    self.name
                ))
            })?;

        let mut launcher = Launcher::new(executable)
            .with_base_args(self.base_args.iter().cloned())
            .with_timeout(timeout.or(self.timeout));
        if let Some(log) = log {
            launcher = launcher.with_log(log);
        }
        Ok(launcher)
    }
}

fn build_scenario(spec: &ScenarioSpec) -> Result<Scenario, SuiteError> {
    if spec.name.trim().is_empty() {
        return Err(SuiteError::Validation(
            "Every scenario needs a non-empty name".to_string(),
        ));
    }

    let mut scenario = Scenario::new(&spec.name);
    for variant in &spec.variants {
        scenario = scenario.with_variant(Variant::new(&variant.capability, variant.args.iter()));
    }
    for (index, iteration) in spec.iterations.iter().enumerate() {
        scenario = scenario.with_iteration(build_iteration(&spec.name, index, iteration)?);
    }
    for sweep in &spec.sweeps {
        scenario = scenario.with_iterations(build_sweep(&spec.name, sweep)?);
    }
    Ok(scenario)
}

fn build_iteration(
    scenario: &str,
    index: usize,
    spec: &IterationSpec,
) -> Result<Iteration, SuiteError> {
    let args = ArgumentVector::new(spec.args.iter()).map_err(|_| {
        SuiteError::Validation(format!(
            "Scenario '{}' iteration {} has no arguments",
            scenario,
            index + 1
        ))
    })?;
    let label = spec.label.clone().unwrap_or_else(|| spec.args.join(" "));

    let mut iteration =
        Iteration::new(label, args).with_timeout(spec.timeout_ms.map(Duration::from_millis));
    if let Some(code) = spec.expect_exit {
        iteration = iteration.expect(Expectation::ExitCode(code));
    }
    for check in &spec.flags {
        for expectation in flag_expectations(scenario, check)? {
            iteration = iteration.expect(expectation);
        }
    }
    for needle in &spec.output_contains {
        iteration = iteration.expect(Expectation::OutputContains(needle.clone()));
    }
    for needle in &spec.output_not_contains {
        iteration = iteration.expect(Expectation::OutputNotContains(needle.clone()));
    }
    Ok(iteration)
}

fn flag_expectations(
    scenario: &str,
    check: &FlagCheckSpec,
) -> Result<Vec<Expectation>, SuiteError> {
    if check.equals.is_none() && check.not_equals.is_none() {
        return Err(SuiteError::Validation(format!(
            "Scenario '{}' checks flag '{}' without `equals` or `not_equals`",
            scenario, check.name
        )));
    }

    let declared = check.flag_type.or_else(|| {
        check
            .equals
            .as_ref()
            .or(check.not_equals.as_ref())
            .map(|v| v.flag_type())
    });
    let flag_type = declared.unwrap_or(FlagType::Int64);
    let flag = FlagDescriptor::new(&check.name, flag_type);

    let mut expectations = Vec::new();
    for (value, equal) in [(&check.equals, true), (&check.not_equals, false)] {
        let Some(value) = value else { continue };
        if value.flag_type() != flag_type {
            return Err(SuiteError::Validation(format!(
                "Scenario '{}' flag '{}' is declared {} but compared with {} value '{}'",
                scenario,
                check.name,
                flag_type,
                value.flag_type(),
                value
            )));
        }
        let expectation = if equal {
            Expectation::FlagEquals {
                flag: flag.clone(),
                value: value.clone(),
            }
        } else {
            Expectation::FlagNotEquals {
                flag: flag.clone(),
                value: value.clone(),
            }
        };
        expectations.push(expectation);
    }
    Ok(expectations)
}

fn build_sweep(scenario: &str, spec: &SweepSpec) -> Result<Vec<Iteration>, SuiteError> {
    if !spec.arg_template.contains("{value}") {
        return Err(SuiteError::Validation(format!(
            "Scenario '{}' sweep over '{}' has arg_template without {{value}}: '{}'",
            scenario, spec.flag, spec.arg_template
        )));
    }
    if let Some(bad) = spec.values.iter().find(|v| v.flag_type() != spec.flag_type) {
        return Err(SuiteError::Validation(format!(
            "Scenario '{}' sweep over '{}' of type {} has {} value '{}'",
            scenario,
            spec.flag,
            spec.flag_type,
            bad.flag_type(),
            bad
        )));
    }

    let flag = FlagDescriptor::new(&spec.flag, spec.flag_type);
    let exit = spec.expect_exit.unwrap_or(0);
    let mut iterations = Iteration::sweep(
        &flag,
        &spec.arg_template,
        spec.values.iter().cloned(),
        &spec.extra_args,
    );
    for iteration in &mut iterations {
        iteration.expectations.insert(0, Expectation::ExitCode(exit));
    }
    Ok(iterations)
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
