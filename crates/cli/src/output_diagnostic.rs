// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostics on stderr, colored when stderr is a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Error,
    Warning,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "Error",
            Level::Warning => "Warning",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warning => "\x1b[33m",
        }
    }
}

fn write_diagnostic<W: Write>(writer: &mut W, level: Level, msg: impl Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "{}{}: {}\x1b[0m", level.color(), level.label(), msg);
    } else {
        let _ = writeln!(writer, "{}: {}", level.label(), msg);
    }
}

/// Print an error message to stderr.
pub fn print_error(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_diagnostic(&mut io::stderr(), Level::Error, msg, is_tty);
}

/// Print a warning message to stderr.
pub fn print_warning(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_diagnostic(&mut io::stderr(), Level::Warning, msg, is_tty);
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
