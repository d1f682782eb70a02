// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Child process launcher.

use crate::output::CapturedOutput;
use crate::registry::{millis, LaunchLog, LaunchOutcome};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

/// Errors that prevent a launch from producing a complete [`CapturedOutput`].
///
/// A child exiting with a non-zero code is not an error.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Argument vector must not be empty")]
    EmptyArguments,

    #[error("Failed to start '{}': {source}", executable.display())]
    Startup {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while collecting output of '{}': {source}", executable.display())]
    Io {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' timed out after {}ms and was killed", executable.display(), timeout.as_millis())]
    Timeout {
        executable: PathBuf,
        timeout: Duration,
    },
}

impl LaunchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, LaunchError::Timeout { .. })
    }
}

/// Ordered, non-empty list of arguments for one launch.
///
/// Order is preserved and nothing is deduplicated; later flags may override
/// earlier ones according to the launched program's own rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub fn new<I, S>(args: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            return Err(LaunchError::EmptyArguments);
        }
        Ok(Self(args))
    }

    /// A vector holding exactly one argument
    pub fn single(arg: impl Into<String>) -> Self {
        Self(vec![arg.into()])
    }

    /// Append further arguments
    pub fn extended<I, S>(mut self, more: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(more.into_iter().map(Into::into));
        self
    }

    /// Prepend `prefix` to these arguments
    pub fn prefixed(&self, prefix: &[String]) -> Self {
        let mut args = prefix.to_vec();
        args.extend(self.0.iter().cloned());
        Self(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArgumentVector {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Launches one executable with per-call argument vectors.
#[derive(Clone, Debug)]
pub struct Launcher {
    executable: PathBuf,
    /// Arguments placed before every call's argument vector
    base_args: Vec<String>,
    env: Vec<(OsString, OsString)>,
    cwd: Option<PathBuf>,
    /// Used when a call passes no timeout
    default_timeout: Option<Duration>,
    log: Option<LaunchLog>,
}

impl Launcher {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            base_args: Vec::new(),
            env: Vec::new(),
            cwd: None,
            default_timeout: None,
            log: None,
        }
    }

    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Record every launch in `log`
    pub fn with_log(mut self, log: LaunchLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn base_args(&self) -> &[String] {
        &self.base_args
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    pub fn log(&self) -> Option<&LaunchLog> {
        self.log.as_ref()
    }

    /// Run the executable to completion and capture its output.
    ///
    /// Both output streams are drained concurrently with waiting for exit,
    /// so a child filling one pipe cannot deadlock the call. When `timeout`
    /// (or the launcher's default) elapses, the child is killed and reaped
    /// and its partial output is discarded.
    pub async fn launch(
        &self,
        args: &ArgumentVector,
        timeout: Option<Duration>,
    ) -> Result<CapturedOutput, LaunchError> {
        let timeout = timeout.or(self.default_timeout);
        let full_args: Vec<String> = self
            .base_args
            .iter()
            .chain(args.as_slice())
            .cloned()
            .collect();

        let mut command = Command::new(&self.executable);
        command
            .args(&full_args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref cwd) = self.cwd {
            command.current_dir(cwd);
        }

        let started = Instant::now();
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                self.record(None, full_args, started, || LaunchOutcome::StartupFailed {
                    reason: source.to_string(),
                });
                return Err(LaunchError::Startup {
                    executable: self.executable.clone(),
                    source,
                });
            }
        };
        let pid = child.id();
        tracing::debug!(
            executable = %self.executable.display(),
            args = full_args.len(),
            pid,
            "launched child process"
        );

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let collect = async {
            tokio::try_join!(child.wait(), drain(stdout), drain(stderr))
        };
        let finished = match timeout {
            Some(limit) => tokio::time::timeout(limit, collect).await.ok(),
            None => Some(collect.await),
        };

        match finished {
            Some(Ok((status, out, err))) => {
                let exit_code = exit_code(status);
                self.record(pid, full_args, started, || LaunchOutcome::Exited { exit_code });
                Ok(CapturedOutput::from_bytes(exit_code, &out, &err))
            }
            Some(Err(source)) => Err(self.abandon(&mut child, full_args, started, source).await),
            None => {
                let limit = timeout.unwrap_or_default();
                tracing::warn!(
                    executable = %self.executable.display(),
                    pid,
                    timeout_ms = millis(limit),
                    "child process timed out, killing"
                );
                if let Err(e) = child.kill().await {
                    tracing::warn!(pid, error = %e, "failed to kill timed out child");
                }
                self.record(pid, full_args, started, || LaunchOutcome::TimedOut {
                    timeout_ms: millis(limit),
                });
                Err(LaunchError::Timeout {
                    executable: self.executable.clone(),
                    timeout: limit,
                })
            }
        }
    }

    /// Blocking form of [`Launcher::launch`] for synchronous callers.
    ///
    /// Drives the launch on a private current-thread runtime, so it must not
    /// be called from within a Tokio runtime.
    pub fn launch_blocking(
        &self,
        args: &ArgumentVector,
        timeout: Option<Duration>,
    ) -> Result<CapturedOutput, LaunchError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| LaunchError::Startup {
                executable: self.executable.clone(),
                source,
            })?;
        runtime.block_on(self.launch(args, timeout))
    }

    /// Kill and reap a child whose output could not be collected, and record
    /// the launch as failed.
    async fn abandon(
        &self,
        child: &mut Child,
        args: Vec<String>,
        started: Instant,
        source: std::io::Error,
    ) -> LaunchError {
        let pid = child.id();
        tracing::warn!(
            executable = %self.executable.display(),
            pid,
            error = %source,
            "failed to collect child output, killing"
        );
        if let Err(e) = child.kill().await {
            tracing::warn!(pid, error = %e, "failed to kill child");
        }
        self.record(pid, args, started, || LaunchOutcome::Failed {
            reason: source.to_string(),
        });
        LaunchError::Io {
            executable: self.executable.clone(),
            source,
        }
    }

    fn record(
        &self,
        pid: Option<u32>,
        args: Vec<String>,
        started: Instant,
        outcome: impl FnOnce() -> LaunchOutcome,
    ) {
        if let Some(ref log) = self.log {
            log.record(
                pid,
                &self.executable.to_string_lossy(),
                args,
                started.elapsed(),
                outcome(),
            );
        }
    }
}

async fn drain<R: AsyncRead + Unpin>(stream: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => -1,
    }
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[cfg(all(test, unix))]
#[path = "launch_tests.rs"]
mod tests;
