// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assertions that carry the captured output of the launch they check.

use crate::output::CapturedOutput;
use std::fmt::{self, Debug};

/// A failed assertion with everything needed to diagnose it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssertionFailure {
    pub message: String,
    pub actual: String,
    pub expected: String,
    /// Output of the launch the assertion was made against
    pub output: Box<CapturedOutput>,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: expected {}, actual {}",
            self.message, self.expected, self.actual
        )?;
        writeln!(f, "exit code: {}", self.output.exit_code())?;
        writeln!(f, "[stdout]")?;
        write_block(f, self.output.stdout())?;
        writeln!(f, "[stderr]")?;
        write_block(f, self.output.stderr())
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if text.is_empty() {
        writeln!(f, "<empty>")
    } else if text.ends_with('\n') {
        write!(f, "{}", text)
    } else {
        writeln!(f, "{}", text)
    }
}

impl std::error::Error for AssertionFailure {}

/// Assertion helpers bound to one [`CapturedOutput`].
#[derive(Clone, Copy, Debug)]
pub struct Assertions<'a> {
    output: &'a CapturedOutput,
}

impl<'a> Assertions<'a> {
    pub fn new(output: &'a CapturedOutput) -> Self {
        Self { output }
    }

    fn fail(
        &self,
        message: impl Into<String>,
        actual: impl Into<String>,
        expected: impl Into<String>,
    ) -> AssertionFailure {
        AssertionFailure {
            message: message.into(),
            actual: actual.into(),
            expected: expected.into(),
            output: Box::new(self.output.clone()),
        }
    }

    pub fn assert_eq<A, E>(
        &self,
        actual: A,
        expected: E,
        message: &str,
    ) -> Result<(), AssertionFailure>
    where
        A: PartialEq<E> + Debug,
        E: Debug,
    {
        if actual == expected {
            Ok(())
        } else {
            Err(self.fail(message, format!("{:?}", actual), format!("{:?}", expected)))
        }
    }

    pub fn assert_ne<A, E>(
        &self,
        actual: A,
        unexpected: E,
        message: &str,
    ) -> Result<(), AssertionFailure>
    where
        A: PartialEq<E> + Debug,
        E: Debug,
    {
        if actual != unexpected {
            Ok(())
        } else {
            Err(self.fail(
                message,
                format!("{:?}", actual),
                format!("anything but {:?}", unexpected),
            ))
        }
    }

    /// Unwrap `value`, failing when it is absent
    pub fn assert_some<T>(&self, value: Option<T>, message: &str) -> Result<T, AssertionFailure> {
        value.ok_or_else(|| self.fail(message, "None", "Some(_)"))
    }

    pub fn assert_true(&self, condition: bool, message: &str) -> Result<(), AssertionFailure> {
        if condition {
            Ok(())
        } else {
            Err(self.fail(message, "false", "true"))
        }
    }

    /// Check that `actual` is one of `allowed`
    pub fn assert_in<T>(
        &self,
        actual: &T,
        allowed: &[T],
        message: &str,
    ) -> Result<(), AssertionFailure>
    where
        T: PartialEq + Debug,
    {
        if allowed.contains(actual) {
            Ok(())
        } else {
            Err(self.fail(
                message,
                format!("{:?}", actual),
                format!("one of {:?}", allowed),
            ))
        }
    }

    pub fn assert_exit_code(&self, expected: i32) -> Result<(), AssertionFailure> {
        self.assert_eq(
            self.output.exit_code(),
            expected,
            "Unexpected exit code",
        )
    }

    /// Check that stdout or stderr contains `needle`
    pub fn assert_contains(&self, needle: &str) -> Result<(), AssertionFailure> {
        if self.output.contains(needle) {
            Ok(())
        } else {
            Err(self.fail(
                format!("Output does not contain '{}'", needle),
                "absent",
                "present",
            ))
        }
    }

    pub fn assert_not_contains(&self, needle: &str) -> Result<(), AssertionFailure> {
        if self.output.contains(needle) {
            Err(self.fail(
                format!("Output unexpectedly contains '{}'", needle),
                "present",
                "absent",
            ))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "assert_tests.rs"]
mod tests;
