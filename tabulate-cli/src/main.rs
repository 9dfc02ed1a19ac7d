//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::error::Error as _;

use tabulate_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    if let Err(err) = tabulate_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("osm-tabulate: {err}");
        let mut cause = err.source();
        while let Some(inner) = cause {
            eprintln!("  caused by: {inner}");
            cause = inner.source();
        }
        std::process::exit(1);
    }
}

/// Send log records to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
