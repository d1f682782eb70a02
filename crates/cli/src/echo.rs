// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The `flag-echo` test double.
//!
//! A small program with a handful of typed flags that prints them as
//! flag-report lines, so suites and harness tests have a cooperative child
//! to launch. Options:
//!
//! - `--set-<flag>=<value>` sets a flag; invalid values exit with code 1
//! - `--use=<engine>` selects an engine (must be one of the supported ones)
//! - `--print-flags` prints every flag after startup
//! - `--stderr-bytes=<n>` writes `n` bytes to stderr before anything else
//! - `--sleep-ms=<n>` sleeps before exiting
//! - `--exit=<code>` exits with `code` after a successful run
//! - `-version` / `--version` prints a version banner to stderr

use thiserror::Error;

/// Engines accepted when `FLAG_ECHO_ENGINES` is unset
pub const DEFAULT_ENGINES: &str = "G1,Parallel,Serial";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EchoError {
    #[error("Unrecognized option: {0}")]
    UnknownOption(String),

    #[error("Unrecognized flag: {0}")]
    UnknownFlag(String),

    #[error("Invalid value '{value}' for flag {flag}: {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("Engine {0} is not supported in this build")]
    UnsupportedEngine(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Value {
    Uint(u32),
    Intx(i64),
    Bool(bool),
    Str(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Flag {
    name: &'static str,
    value: Value,
    from_command_line: bool,
}

impl Flag {
    fn type_tag(&self) -> &'static str {
        match self.value {
            Value::Uint(_) => "uint",
            Value::Intx(_) => "intx",
            Value::Bool(_) => "bool",
            Value::Str(_) => "ccstr",
        }
    }

    fn render_value(&self) -> String {
        match &self.value {
            Value::Uint(v) => v.to_string(),
            Value::Intx(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Str(v) => v.clone(),
        }
    }
}

/// Parsed invocation of `flag-echo`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EchoPlan {
    flags: Vec<Flag>,
    pub print_flags: bool,
    pub print_version: bool,
    pub stderr_bytes: usize,
    pub sleep_ms: u64,
    pub exit_code: i32,
}

impl EchoPlan {
    fn defaults() -> Self {
        let flag = |name, value| Flag {
            name,
            value,
            from_command_line: false,
        };
        Self {
            flags: vec![
                flag("flag", Value::Uint(4)),
                flag("budget", Value::Intx(0)),
                flag("verbose", Value::Bool(false)),
                flag("mode", Value::Str("default".to_string())),
                flag("engine", Value::Str("Serial".to_string())),
            ],
            print_flags: false,
            print_version: false,
            stderr_bytes: 0,
            sleep_ms: 0,
            exit_code: 0,
        }
    }

    /// Parse arguments; later settings override earlier ones.
    pub fn parse<I, S>(args: I, engines: &str) -> Result<Self, EchoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut plan = Self::defaults();
        for arg in args {
            let arg = arg.as_ref();
            if arg == "--print-flags" {
                plan.print_flags = true;
            } else if arg == "--version" || arg == "-version" {
                plan.print_version = true;
            } else if let Some(setting) = arg.strip_prefix("--set-") {
                let (name, value) = setting
                    .split_once('=')
                    .ok_or_else(|| EchoError::UnknownOption(arg.to_string()))?;
                plan.set(name, value)?;
            } else if let Some(engine) = arg.strip_prefix("--use=") {
                let supported = engines.split(',').map(str::trim).any(|e| e == engine);
                if !supported {
                    return Err(EchoError::UnsupportedEngine(engine.to_string()));
                }
                plan.set("engine", engine)?;
            } else if let Some(n) = arg.strip_prefix("--stderr-bytes=") {
                plan.stderr_bytes = parse_option(arg, n)?;
            } else if let Some(n) = arg.strip_prefix("--sleep-ms=") {
                plan.sleep_ms = parse_option(arg, n)?;
            } else if let Some(n) = arg.strip_prefix("--exit=") {
                plan.exit_code = parse_option(arg, n)?;
            } else {
                return Err(EchoError::UnknownOption(arg.to_string()));
            }
        }
        Ok(plan)
    }

    fn set(&mut self, name: &str, raw: &str) -> Result<(), EchoError> {
        let flag = self
            .flags
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| EchoError::UnknownFlag(name.to_string()))?;
        let invalid = |reason: &str| EchoError::InvalidValue {
            flag: name.to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        flag.value = match flag.value {
            Value::Uint(_) => {
                let v: u32 = raw
                    .parse()
                    .map_err(|_| invalid("expected an unsigned 32-bit integer"))?;
                if v == 0 {
                    return Err(invalid("must be at least 1"));
                }
                Value::Uint(v)
            }
            Value::Intx(_) => Value::Intx(
                raw.parse()
                    .map_err(|_| invalid("expected a signed 64-bit integer"))?,
            ),
            Value::Bool(_) => match raw {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return Err(invalid("expected true or false")),
            },
            Value::Str(_) => Value::Str(raw.to_string()),
        };
        flag.from_command_line = true;
        Ok(())
    }

    /// Flag-report listing, one line per flag
    pub fn render_flags(&self) -> String {
        let mut out = String::from("[Global flags]\n");
        for flag in &self.flags {
            let (separator, origin) = if flag.from_command_line {
                (":=", "command line")
            } else {
                ("=", "default")
            };
            out.push_str(&format!(
                "{:>9} {:<40} {:<2} {:<40} {{product}} {{{}}}\n",
                flag.type_tag(),
                flag.name,
                separator,
                flag.render_value(),
                origin
            ));
        }
        out
    }

    /// Filler written to stderr, in 64-byte lines
    pub fn stderr_filler(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.stderr_bytes);
        while buf.len() < self.stderr_bytes {
            if buf.len() % 64 == 63 {
                buf.push(b'\n');
            } else {
                buf.push(b'x');
            }
        }
        buf
    }
}

fn parse_option<T: std::str::FromStr>(arg: &str, raw: &str) -> Result<T, EchoError> {
    raw.parse()
        .map_err(|_| EchoError::UnknownOption(arg.to_string()))
}

#[cfg(test)]
#[path = "echo_tests.rs"]
mod tests;
