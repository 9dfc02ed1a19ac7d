//! Command-line interface for auditing and tabulating OpenStreetMap extracts.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{ErrorKind, Write};

mod audit;
mod error;
mod process;

pub use error::CliError;

use audit::{AuditArgs, run_audit};
use process::{ProcessArgs, run_process};

pub(crate) const ARG_OSM: &str = "osm";
pub(crate) const ARG_OUTPUT_DIR: &str = "output-dir";
pub(crate) const ARG_SINK: &str = "sink";
pub(crate) const ARG_BATCH_SIZE: &str = "batch-size";
pub(crate) const ENV_AUDIT_OSM: &str = "TABULATE_CMDS_AUDIT_OSM";
pub(crate) const ENV_PROCESS_OSM: &str = "TABULATE_CMDS_PROCESS_OSM";
pub(crate) const ENV_PROCESS_OUTPUT_DIR: &str = "TABULATE_CMDS_PROCESS_OUTPUT_DIR";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, or when
/// the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Audit(args) => run_audit(args),
        Command::Process(args) => run_process(args),
    }
}

/// Check that `path` names an existing file, labelling failures with `field`.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match tabulate_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == ErrorKind::NotFound => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `value` to `writer` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "osm-tabulate",
    about = "Audit and tabulate OpenStreetMap XML extracts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Tally postal code, street and phone formats found in an extract.
    Audit(AuditArgs),
    /// Normalise an extract and write it as five relational tables.
    Process(ProcessArgs),
}

#[cfg(test)]
mod tests;
