// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flag verification suites
//!
//! Runs declarative TOML/JSON suites through `flagprobe-harness`: each
//! scenario launches the target executable with controlled arguments and
//! checks the exit code, output, and reported flag values. Also ships the
//! `flag-echo` test double used by the integration tests.

// Internal modules - pub for binary access, hidden from docs
#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod commands;
pub mod config;
#[doc(hidden)]
pub mod echo;
#[doc(hidden)]
pub mod env;
#[doc(hidden)]
pub mod output_diagnostic;
pub mod report;
pub mod suite;
