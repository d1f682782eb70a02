// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `flag-echo` entry point.

use std::io::Write;
use std::time::Duration;

use flagprobe::echo::{EchoPlan, DEFAULT_ENGINES};
use flagprobe::env;
use flagprobe::output_diagnostic::print_error;

fn main() {
    let engines = env::echo_engines().unwrap_or_else(|| DEFAULT_ENGINES.to_string());
    let plan = match EchoPlan::parse(std::env::args().skip(1), &engines) {
        Ok(plan) => plan,
        Err(e) => {
            print_error(e);
            std::process::exit(1);
        }
    };

    let mut stderr = std::io::stderr().lock();
    let _ = stderr.write_all(&plan.stderr_filler());
    if plan.print_version {
        let _ = writeln!(stderr, "flag-echo {}", env!("CARGO_PKG_VERSION"));
    }
    drop(stderr);

    if plan.print_flags {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(plan.render_flags().as_bytes());
        let _ = stdout.flush();
    }

    if plan.sleep_ms > 0 {
        std::thread::sleep(Duration::from_millis(plan.sleep_ms));
    }
    std::process::exit(plan.exit_code);
}
