// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured output of a completed child process.

use crate::assert::Assertions;
use regex::Regex;

/// Which output stream to inspect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Exit code and full text output of one launch.
///
/// Only constructed once the child has exited and both streams were drained
/// to EOF, so the record is always complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl CapturedOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Build from raw stream bytes, decoding lossily
    pub(crate) fn from_bytes(exit_code: i32, stdout: &[u8], stderr: &[u8]) -> Self {
        Self::new(
            exit_code,
            String::from_utf8_lossy(stdout),
            String::from_utf8_lossy(stderr),
        )
    }

    /// Raw exit code as reported by the child
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn stream(&self, stream: Stream) -> &str {
        match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        }
    }

    /// Standard output followed by standard error
    pub fn output(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }

    /// Lines of standard output
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines()
    }

    /// Whether either stream contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle) || self.stderr.contains(needle)
    }

    /// First match of `pattern` in standard output, returning capture `group`.
    ///
    /// Returns `None` when nothing matches or the group did not participate
    /// in the match.
    pub fn first_match(&self, pattern: &Regex, group: usize) -> Option<&str> {
        self.first_match_in(Stream::Stdout, pattern, group)
    }

    pub fn first_match_in(&self, stream: Stream, pattern: &Regex, group: usize) -> Option<&str> {
        pattern
            .captures(self.stream(stream))
            .and_then(|caps| caps.get(group))
            .map(|m| m.as_str())
    }

    /// Capture `group` of every match of `pattern` in standard output
    pub fn all_matches(&self, pattern: &Regex, group: usize) -> Vec<&str> {
        pattern
            .captures_iter(&self.stdout)
            .filter_map(|caps| caps.get(group))
            .map(|m| m.as_str())
            .collect()
    }

    /// Assertions that attach this output to every failure
    pub fn assertions(&self) -> Assertions<'_> {
        Assertions::new(self)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
