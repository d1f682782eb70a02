// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for integration tests.

#![allow(dead_code)]

use flagprobe_harness::{ArgumentVector, LaunchLog, Launcher};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Path to the `flag-echo` test double
pub fn flag_echo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_flag-echo"))
}

/// Launcher for `flag-echo` that always prints its flags
pub fn echo_launcher() -> Launcher {
    Launcher::new(flag_echo_bin()).with_base_args(["--print-flags"])
}

/// `echo_launcher` recording into a fresh log
pub fn logged_echo_launcher() -> (Launcher, LaunchLog) {
    let log = LaunchLog::new();
    (echo_launcher().with_log(log.clone()), log)
}

pub fn args(list: &[&str]) -> ArgumentVector {
    ArgumentVector::new(list.iter().copied()).unwrap()
}

/// Write a suite file; JSON content gets a `.json` extension
pub fn write_suite(content: &str) -> NamedTempFile {
    let is_json = content.trim().starts_with('{');
    let suffix = if is_json { ".json" } else { ".toml" };
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Suite header pointing at `flag-echo`
pub fn suite_header(name: &str) -> String {
    format!(
        "name = \"{}\"\nexecutable = {:?}\nbase_args = [\"--print-flags\"]\ntimeout_ms = 10000\n",
        name,
        flag_echo_bin().display().to_string()
    )
}
