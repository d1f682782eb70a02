// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by flagprobe are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::time::Duration;

/// `FLAGPROBE_TIMEOUT_MS`: Default launch timeout when neither the suite
/// nor the command line sets one.
pub fn timeout() -> Option<Duration> {
    var_u64(names::FLAGPROBE_TIMEOUT_MS).map(Duration::from_millis)
}

/// `FLAGPROBE_CAPABILITIES`: Extra capabilities the probe reports as
/// supported, comma separated.
pub fn capabilities() -> Option<String> {
    std::env::var(names::FLAGPROBE_CAPABILITIES).ok()
}

/// `FLAGPROBE_LOG`: Tracing filter directive (e.g. `debug`).
pub fn log_filter() -> Option<String> {
    std::env::var(names::FLAGPROBE_LOG)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// `FLAG_ECHO_ENGINES`: Engines the `flag-echo` fixture accepts.
pub fn echo_engines() -> Option<String> {
    std::env::var(names::FLAG_ECHO_ENGINES).ok()
}

fn var_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
