// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario driver: capability gating, iteration and verdicts.

use crate::assert::AssertionFailure;
use crate::flags::{FlagDescriptor, FlagValue, ParseError};
use crate::launch::{ArgumentVector, LaunchError, Launcher};
use crate::output::CapturedOutput;
use crate::probe::CapabilityProbe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// "This scenario does not apply here."
///
/// Not an error: a skipped scenario is neither passed nor failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkipSignal {
    pub reason: String,
}

impl SkipSignal {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Keep the capabilities `probe` supports; skip when none are.
pub fn require_any<S: AsRef<str>>(
    probe: &dyn CapabilityProbe,
    capabilities: &[S],
) -> Result<Vec<String>, SkipSignal> {
    let names: Vec<&str> = capabilities.iter().map(|s| s.as_ref()).collect();
    let supported: Vec<String> = names
        .iter()
        .filter(|name| probe.is_supported(name))
        .map(|name| name.to_string())
        .collect();

    if supported.is_empty() {
        return Err(SkipSignal::new(format!(
            "none of {} is supported",
            names.join("/")
        )));
    }
    Ok(supported)
}

/// Hard failure of one scenario iteration
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
}

/// A check applied to the output of one launch
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expectation {
    ExitCode(i32),
    FlagEquals {
        flag: FlagDescriptor,
        value: FlagValue,
    },
    FlagNotEquals {
        flag: FlagDescriptor,
        value: FlagValue,
    },
    OutputContains(String),
    OutputNotContains(String),
}

impl Expectation {
    pub fn check(&self, output: &CapturedOutput) -> Result<(), ScenarioError> {
        let asserts = output.assertions();
        match self {
            Expectation::ExitCode(code) => asserts.assert_exit_code(*code)?,
            Expectation::FlagEquals { flag, value } => {
                let actual = flag.extract(output.stdout())?;
                asserts.assert_eq(
                    &actual,
                    value,
                    &format!("Flag {} has unexpected value", flag.name),
                )?
            }
            Expectation::FlagNotEquals { flag, value } => {
                let actual = flag.extract(output.stdout())?;
                asserts.assert_ne(
                    &actual,
                    value,
                    &format!("Flag {} has forbidden value", flag.name),
                )?
            }
            Expectation::OutputContains(needle) => asserts.assert_contains(needle)?,
            Expectation::OutputNotContains(needle) => asserts.assert_not_contains(needle)?,
        }
        Ok(())
    }
}

/// One launch plus the expectations checked against it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Iteration {
    pub label: String,
    pub args: ArgumentVector,
    pub expectations: Vec<Expectation>,
    pub timeout: Option<Duration>,
}

impl Iteration {
    pub fn new(label: impl Into<String>, args: ArgumentVector) -> Self {
        Self {
            label: label.into(),
            args,
            expectations: Vec::new(),
            timeout: None,
        }
    }

    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// One iteration per value, each setting the flag through `arg_template`
    /// (where `{value}` is replaced) and expecting it to read back unchanged.
    pub fn sweep<I>(
        flag: &FlagDescriptor,
        arg_template: &str,
        values: I,
        extra_args: &[String],
    ) -> Vec<Iteration>
    where
        I: IntoIterator<Item = FlagValue>,
    {
        values
            .into_iter()
            .map(|value| {
                let arg = arg_template.replace("{value}", &value.to_string());
                let args = ArgumentVector::single(arg).extended(extra_args.iter().cloned());
                Iteration::new(format!("{}={}", flag.name, value), args).expect(
                    Expectation::FlagEquals {
                        flag: flag.clone(),
                        value,
                    },
                )
            })
            .collect()
    }
}

/// Alternative configuration gated on a capability; its args are prepended
/// to every iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub capability: String,
    pub args: Vec<String>,
}

impl Variant {
    pub fn new<I, S>(capability: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            capability: capability.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named group of iterations.
///
/// With no variants every iteration runs once. With variants, iterations
/// run once per supported variant, and the scenario is skipped when no
/// variant is supported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub variants: Vec<Variant>,
    pub iterations: Vec<Iteration>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn with_iteration(mut self, iteration: Iteration) -> Self {
        self.iterations.push(iteration);
        self
    }

    pub fn with_iterations(mut self, iterations: impl IntoIterator<Item = Iteration>) -> Self {
        self.iterations.extend(iterations);
        self
    }
}

/// Aggregate result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    Skipped,
}

/// Result of one iteration (per variant)
#[derive(Debug)]
pub struct IterationReport {
    pub label: String,
    /// Capability of the variant it ran under
    pub variant: Option<String>,
    pub result: Result<(), ScenarioError>,
}

#[derive(Debug)]
pub enum ScenarioOutcome {
    Skipped(SkipSignal),
    Ran(Vec<IterationReport>),
}

#[derive(Debug)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: ScenarioOutcome,
}

impl ScenarioReport {
    pub fn verdict(&self) -> Verdict {
        match &self.outcome {
            ScenarioOutcome::Skipped(_) => Verdict::Skipped,
            ScenarioOutcome::Ran(iterations) => {
                if iterations.iter().any(|i| i.result.is_err()) {
                    Verdict::Failed
                } else {
                    Verdict::Passed
                }
            }
        }
    }

    pub fn iterations(&self) -> &[IterationReport] {
        match &self.outcome {
            ScenarioOutcome::Skipped(_) => &[],
            ScenarioOutcome::Ran(iterations) => iterations.as_slice(),
        }
    }

    /// Iterations that failed
    pub fn failures(&self) -> impl Iterator<Item = &IterationReport> {
        self.iterations().iter().filter(|i| i.result.is_err())
    }
}

/// Reports for a sequence of scenarios
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    fn count(&self, verdict: Verdict) -> usize {
        self.scenarios
            .iter()
            .filter(|s| s.verdict() == verdict)
            .count()
    }

    pub fn passed(&self) -> usize {
        self.count(Verdict::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(Verdict::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(Verdict::Skipped)
    }

    /// Failed if anything failed, skipped if everything was skipped
    pub fn verdict(&self) -> Verdict {
        if self.failed() > 0 {
            Verdict::Failed
        } else if !self.scenarios.is_empty() && self.skipped() == self.scenarios.len() {
            Verdict::Skipped
        } else {
            Verdict::Passed
        }
    }
}

/// Runs scenarios against one launcher
#[derive(Clone)]
pub struct ScenarioRunner {
    launcher: Launcher,
    probe: Arc<dyn CapabilityProbe>,
}

impl ScenarioRunner {
    pub fn new(launcher: Launcher, probe: impl CapabilityProbe + 'static) -> Self {
        Self {
            launcher,
            probe: Arc::new(probe),
        }
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    /// Run one scenario.
    ///
    /// Capability gating happens before any launch. Failed iterations are
    /// reported and do not stop the remaining ones; nothing is retried.
    pub async fn run(&self, scenario: &Scenario) -> ScenarioReport {
        let variants: Vec<Option<&Variant>> = if scenario.variants.is_empty() {
            vec![None]
        } else {
            let names: Vec<&str> = scenario
                .variants
                .iter()
                .map(|v| v.capability.as_str())
                .collect();
            match require_any(self.probe.as_ref(), &names) {
                Ok(supported) => scenario
                    .variants
                    .iter()
                    .filter(|v| supported.contains(&v.capability))
                    .map(Some)
                    .collect(),
                Err(skip) => {
                    tracing::debug!(
                        scenario = %scenario.name,
                        reason = %skip.reason,
                        "skipping scenario"
                    );
                    return ScenarioReport {
                        name: scenario.name.clone(),
                        outcome: ScenarioOutcome::Skipped(skip),
                    };
                }
            }
        };

        let mut reports = Vec::new();
        for variant in variants {
            for iteration in &scenario.iterations {
                let result = self.run_iteration(iteration, variant).await;
                if let Err(ref e) = result {
                    tracing::debug!(
                        scenario = %scenario.name,
                        iteration = %iteration.label,
                        error = %e,
                        "iteration failed"
                    );
                }
                reports.push(IterationReport {
                    label: iteration.label.clone(),
                    variant: variant.map(|v| v.capability.clone()),
                    result,
                });
            }
        }

        ScenarioReport {
            name: scenario.name.clone(),
            outcome: ScenarioOutcome::Ran(reports),
        }
    }

    /// Run scenarios in order
    pub async fn run_all(&self, scenarios: &[Scenario]) -> SuiteReport {
        let mut report = SuiteReport::default();
        for scenario in scenarios {
            report.scenarios.push(self.run(scenario).await);
        }
        report
    }

    /// Launch one iteration and check its expectations, stopping at the
    /// first violated one.
    pub async fn run_iteration(
        &self,
        iteration: &Iteration,
        variant: Option<&Variant>,
    ) -> Result<(), ScenarioError> {
        let args = match variant {
            Some(v) => iteration.args.prefixed(&v.args),
            None => iteration.args.clone(),
        };
        let output = self.launcher.launch(&args, iteration.timeout).await?;
        for expectation in &iteration.expectations {
            expectation.check(&output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
