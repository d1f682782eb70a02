// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `flagprobe` binary entry point.

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flagprobe::cli::{Cli, Command};
use flagprobe::commands::{self, exit_codes};
use flagprobe::env;
use flagprobe::output_diagnostic::print_error;

fn init_tracing(verbose: bool) {
    let directive = if verbose {
        "debug".to_string()
    } else {
        env::log_filter().unwrap_or_else(|| "warn".to_string())
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = std::io::stdout();
    let code = match cli.command {
        Command::Run(args) => match commands::run(&args, &mut stdout).await {
            Ok(code) => code,
            Err(e) => {
                print_error(e);
                exit_codes::USAGE
            }
        },
        Command::Probe(args) => match commands::probe(&args, &mut stdout) {
            Ok(code) => code,
            Err(e) => {
                print_error(e);
                exit_codes::USAGE
            }
        },
        Command::Extract(args) => match commands::read_report(args.file.as_deref()) {
            Ok(text) => match commands::extract(&args, &text) {
                Ok(value) => {
                    println!("{}", value);
                    exit_codes::SUCCESS
                }
                Err(e) => {
                    print_error(e);
                    exit_codes::FAILED
                }
            },
            Err(e) => {
                print_error(format_args!("Failed to read flag report: {}", e));
                exit_codes::USAGE
            }
        },
    };
    let _ = stdout.flush();
    std::process::exit(code);
}
