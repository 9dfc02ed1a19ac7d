//! Process command: normalise an extract and write the five tables.

use std::io::{ErrorKind, Write};
use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tabulate_core::ShapeConfig;
use tabulate_data::{
    CsvSink, DEFAULT_BATCH_SIZE, ProcessSummary, SqliteSink, TabularSink, open_source, process_map,
};

use crate::{
    ARG_BATCH_SIZE, ARG_OSM, ARG_OUTPUT_DIR, ARG_SINK, CliError, ENV_PROCESS_OSM,
    ENV_PROCESS_OUTPUT_DIR, require_existing, write_json,
};

/// File name of the database written by the SQLite sink.
pub(crate) const DATABASE_FILE_NAME: &str = "osm.db";

/// Output format of the `process` subcommand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SinkKind {
    /// One CSV file per table.
    #[default]
    Csv,
    /// One SQLite database holding all tables.
    Sqlite,
}

/// CLI arguments for the `process` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "process",
    long_about = "Stream an OSM XML extract, normalise postal codes, street \
                 names and phone numbers, and write nodes, ways and their \
                 tags as relational tables. Records that cannot be shaped \
                 are logged and skipped.",
    about = "Normalise an extract into relational tables"
)]
#[ortho_config(prefix = "TABULATE")]
pub(crate) struct ProcessArgs {
    /// Path to the OSM XML extract (optionally `.bz2`).
    #[arg(long = ARG_OSM, value_name = "path")]
    #[serde(default)]
    pub(crate) osm: Option<Utf8PathBuf>,
    /// Directory receiving the CSV files or the SQLite database.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Output format (defaults to `csv`).
    #[arg(long = ARG_SINK, value_enum, value_name = "kind")]
    #[serde(default)]
    pub(crate) sink: Option<SinkKind>,
    /// Records per SQLite transaction (defaults to 10000).
    #[arg(long = ARG_BATCH_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) batch_size: Option<NonZeroUsize>,
}

impl ProcessArgs {
    pub(crate) fn into_config(self) -> Result<ProcessConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ProcessConfig::try_from(merged)
    }
}

/// Resolved `process` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProcessConfig {
    pub(crate) osm: Utf8PathBuf,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) sink: SinkKind,
    pub(crate) batch_size: NonZeroUsize,
}

impl ProcessConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.osm, ARG_OSM)?;
        match tabulate_fs::file_is_file(&self.output_dir) {
            Ok(true) => Err(CliError::OutputDirectoryNotDirectory {
                path: self.output_dir.clone(),
            }),
            Ok(false) => Ok(()),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_OUTPUT_DIR,
                path: self.output_dir.clone(),
                source,
            }),
        }
    }

    /// Location of the SQLite database inside the output directory.
    pub(crate) fn database_path(&self) -> Utf8PathBuf {
        self.output_dir.join(DATABASE_FILE_NAME)
    }

    fn open_sink(&self) -> Result<Box<dyn TabularSink>, CliError> {
        match self.sink {
            SinkKind::Csv => {
                let sink =
                    CsvSink::create(&self.output_dir).map_err(|source| CliError::CreateSink {
                        path: self.output_dir.clone(),
                        source,
                    })?;
                Ok(Box::new(sink))
            }
            SinkKind::Sqlite => {
                let path = self.database_path();
                let sink = SqliteSink::create(&path, self.batch_size)
                    .map_err(|source| CliError::CreateSink { path, source })?;
                Ok(Box::new(sink))
            }
        }
    }
}

impl TryFrom<ProcessArgs> for ProcessConfig {
    type Error = CliError;

    fn try_from(args: ProcessArgs) -> Result<Self, Self::Error> {
        let osm = args.osm.ok_or(CliError::MissingArgument {
            field: ARG_OSM,
            env: ENV_PROCESS_OSM,
        })?;
        let output_dir = args.output_dir.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT_DIR,
            env: ENV_PROCESS_OUTPUT_DIR,
        })?;
        Ok(Self {
            osm,
            output_dir,
            sink: args.sink.unwrap_or_default(),
            batch_size: args.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        })
    }
}

pub(crate) fn run_process(args: ProcessArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_process_with(args, &mut stdout)
}

pub(crate) fn run_process_with(args: ProcessArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let summary = execute_process(args)?;
    write_json(writer, &summary)
}

fn execute_process(args: ProcessArgs) -> Result<ProcessSummary, CliError> {
    let config = resolve_process_config(args)?;
    let source = open_source(&config.osm)?;
    let mut sink = config.open_sink()?;
    info!(
        "Processing {} into {} ({:?})",
        config.osm, config.output_dir, config.sink
    );
    process_map(source, sink.as_mut(), &ShapeConfig::default()).map_err(|source| {
        CliError::Process {
            path: config.osm.clone(),
            source,
        }
    })
}

fn resolve_process_config(args: ProcessArgs) -> Result<ProcessConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ProcessConfig, CliError> {
    let merged = ProcessArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ProcessConfig::try_from(merged)
}
