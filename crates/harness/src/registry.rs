// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Launch log recording every child process the harness starts.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How a launch ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaunchOutcome {
    /// Child exited on its own; output was fully captured
    Exited { exit_code: i32 },
    /// Child exceeded its timeout and was killed
    TimedOut { timeout_ms: u64 },
    /// Executable could not be started
    StartupFailed { reason: String },
    /// Collecting output failed; the child was killed
    Failed { reason: String },
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A single recorded launch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub seq: u64,
    /// OS process id, when the child was started
    pub pid: Option<u32>,
    pub executable: String,
    pub args: Vec<String>,
    pub elapsed_ms: u64,
    pub outcome: LaunchOutcome,
}

/// Shared, injectable record of launches.
///
/// Clones share the same underlying records.
pub struct LaunchLog {
    start: Instant,
    records: Arc<Mutex<Vec<LaunchRecord>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl LaunchLog {
    /// Create a new in-memory launch log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create a launch log that also appends each record to a JSONL file
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
        })
    }

    pub(crate) fn record(
        &self,
        pid: Option<u32>,
        executable: &str,
        args: Vec<String>,
        elapsed: Duration,
        outcome: LaunchOutcome,
    ) {
        let mut records = self.records.lock();
        let record = LaunchRecord {
            seq: u64::try_from(records.len()).unwrap_or(u64::MAX),
            pid,
            executable: executable.to_string(),
            args,
            elapsed_ms: millis(elapsed),
            outcome,
        };

        records.push(record.clone());

        if let Some(ref writer) = self.file_writer {
            use std::io::Write;
            let mut w = writer.lock();
            if let Ok(json) = serde_json::to_string(&record) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }
    }

    /// Time since the log was created
    pub fn uptime(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn records(&self) -> Vec<LaunchRecord> {
        self.records.lock().clone()
    }

    /// The most recent record
    pub fn last(&self) -> Option<LaunchRecord> {
        self.records.lock().last().cloned()
    }

    /// Count records matching a predicate
    pub fn count<F: Fn(&LaunchRecord) -> bool>(&self, pred: F) -> usize {
        self.records.lock().iter().filter(|r| pred(r)).count()
    }

    /// Records whose child timed out
    pub fn find_timeouts(&self) -> Vec<LaunchRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| matches!(r.outcome, LaunchOutcome::TimedOut { .. }))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for LaunchLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LaunchLog {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            records: Arc::clone(&self.records),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

impl std::fmt::Debug for LaunchLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchLog")
            .field("records", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
