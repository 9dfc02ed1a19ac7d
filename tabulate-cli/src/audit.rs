//! Audit command: tally the formats found in an extract before cleaning it.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tabulate_core::{AuditReport, StreetSuffixes};
use tabulate_data::{audit_map, open_source};

use crate::{ARG_OSM, CliError, ENV_AUDIT_OSM, require_existing, write_json};

/// CLI arguments for the `audit` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "audit",
    long_about = "Stream an OSM XML extract and report the postal code, \
                 phone number and street suffix formats it contains. The \
                 report is printed as JSON and nothing is written to disk.",
    about = "Report postal code, phone and street formats in an extract"
)]
#[ortho_config(prefix = "TABULATE")]
pub(crate) struct AuditArgs {
    /// Path to the OSM XML extract (optionally `.bz2`).
    #[arg(long = ARG_OSM, value_name = "path")]
    #[serde(default)]
    pub(crate) osm: Option<Utf8PathBuf>,
}

impl AuditArgs {
    pub(crate) fn into_config(self) -> Result<AuditConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AuditConfig::try_from(merged)
    }
}

/// Resolved `audit` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuditConfig {
    /// Path to the extract.
    pub(crate) osm: Utf8PathBuf,
}

impl TryFrom<AuditArgs> for AuditConfig {
    type Error = CliError;

    fn try_from(args: AuditArgs) -> Result<Self, Self::Error> {
        let osm = args.osm.ok_or(CliError::MissingArgument {
            field: ARG_OSM,
            env: ENV_AUDIT_OSM,
        })?;
        Ok(Self { osm })
    }
}

pub(crate) fn run_audit(args: AuditArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_audit_with(args, &mut stdout)
}

pub(crate) fn run_audit_with(args: AuditArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.osm, ARG_OSM)?;
    let report = audit_extract(&config.osm)?;
    write_json(writer, &report)
}

pub(crate) fn audit_extract(path: &Utf8Path) -> Result<AuditReport, CliError> {
    info!("Auditing {path}");
    let source = open_source(path)?;
    audit_map(source, &StreetSuffixes::default()).map_err(|source| CliError::Audit {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<AuditConfig, CliError> {
    let merged = AuditArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AuditConfig::try_from(merged)
}
