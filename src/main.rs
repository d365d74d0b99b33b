//! Application entry point.
//!
//! Parses command-line arguments and delegates execution to [`runner::run`].

use mkdeps::{cli::Cli, runner};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = Cli::parse_with_default();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();
    match runner::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let report = format!("{err:#}");
            tracing::error!(error = %report, "mkdeps failed");
            ExitCode::FAILURE
        }
    }
}
