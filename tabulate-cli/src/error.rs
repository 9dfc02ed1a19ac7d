//! Error types emitted by the tabulate CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use tabulate_data::{OpenSourceError, ProcessError, SinkError, SourceError};
use thiserror::Error;

/// Errors emitted by the tabulate CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The output directory exists but is not a directory.
    #[error("output directory {path:?} is not a directory")]
    OutputDirectoryNotDirectory { path: Utf8PathBuf },
    /// Opening the extract failed.
    #[error(transparent)]
    OpenSource(#[from] OpenSourceError),
    /// The extract could not be read while auditing.
    #[error("failed to audit {path:?}")]
    Audit {
        path: Utf8PathBuf,
        #[source]
        source: SourceError,
    },
    /// Preparing the output sink failed.
    #[error("failed to prepare output in {path:?}")]
    CreateSink {
        path: Utf8PathBuf,
        #[source]
        source: SinkError,
    },
    /// Processing the extract failed part way through.
    #[error("failed to process {path:?}")]
    Process {
        path: Utf8PathBuf,
        #[source]
        source: ProcessError,
    },
    /// Serializing a report failed.
    #[error("failed to serialize report")]
    SerializeReport(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output")]
    WriteOutput(#[source] std::io::Error),
}
