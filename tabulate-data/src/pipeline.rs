//! End-to-end drivers: stream, shape and persist, or stream and audit.

use std::io::BufRead;

use log::{info, warn};
use serde::Serialize;
use tabulate_core::{AuditReport, ShapeConfig, ShapedRecord, StreetSuffixes, shape_element};
use thiserror::Error;

use crate::sink::{SinkError, TabularSink};
use crate::traversal::{OsmElementReader, SourceError};

/// Row counts of one processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    /// Rows written to `nodes`.
    pub nodes: u64,
    /// Rows written to `ways`.
    pub ways: u64,
    /// Rows written to `nodes_tags`.
    pub node_tags: u64,
    /// Rows written to `ways_tags`.
    pub way_tags: u64,
    /// Rows written to `ways_nodes`.
    pub way_nodes: u64,
    /// Elements excluded because they could not be shaped.
    pub skipped: u64,
}

impl ProcessSummary {
    fn record(&mut self, record: &ShapedRecord) {
        match record {
            ShapedRecord::Node { tags, .. } => {
                self.nodes += 1;
                self.node_tags += count(tags.len());
            }
            ShapedRecord::Way { nodes, tags, .. } => {
                self.ways += 1;
                self.way_nodes += count(nodes.len());
                self.way_tags += count(tags.len());
            }
        }
    }
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Errors that abort a processing run.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The source could not be read.
    #[error("failed to read OSM source")]
    Source(#[from] SourceError),
    /// Rows could not be persisted.
    #[error("failed to persist rows")]
    Sink(#[from] SinkError),
}

/// Stream `source`, shape every node and way, and write the rows to `sink`.
///
/// Elements that fail to shape are logged and counted as skipped; the run
/// continues. The sink is finished before the summary is returned, and also
/// when the run aborts, so records written before the failure are kept.
///
/// # Errors
/// Returns [`ProcessError::Source`] for malformed input and
/// [`ProcessError::Sink`] when the sink fails. Either ends the run.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use tabulate_core::ShapeConfig;
/// use tabulate_data::{MemorySink, process_map};
///
/// let xml = r#"<osm>
///   <node id="1" lat="40.7" lon="-74.0" user="a" uid="1" version="1"
///         changeset="5" timestamp="2016-01-01T00:00:00Z">
///     <tag k="addr:postcode" v="10001-2062"/>
///   </node>
///   <node id="2" lat="40.7"/>
/// </osm>"#;
/// let mut sink = MemorySink::new();
/// let summary = process_map(Cursor::new(xml), &mut sink, &ShapeConfig::default())?;
///
/// assert_eq!((summary.nodes, summary.node_tags, summary.skipped), (1, 1, 1));
/// assert_eq!(sink.records()[0].tags()[0].value, "10001");
/// # Ok::<(), tabulate_data::ProcessError>(())
/// ```
pub fn process_map<R, S>(
    source: R,
    sink: &mut S,
    config: &ShapeConfig,
) -> Result<ProcessSummary, ProcessError>
where
    R: BufRead,
    S: TabularSink + ?Sized,
{
    let mut summary = ProcessSummary::default();
    if let Err(err) = write_records(source, sink, config, &mut summary) {
        if let Err(finish_err) = sink.finish() {
            warn!("Failed to finish output after aborted run: {finish_err}");
        }
        return Err(err);
    }
    sink.finish()?;
    info!(
        "Wrote {} nodes, {} ways, {} node tags, {} way tags and {} way nodes; skipped {} elements",
        summary.nodes,
        summary.ways,
        summary.node_tags,
        summary.way_tags,
        summary.way_nodes,
        summary.skipped
    );
    Ok(summary)
}

fn write_records<R, S>(
    source: R,
    sink: &mut S,
    config: &ShapeConfig,
    summary: &mut ProcessSummary,
) -> Result<(), ProcessError>
where
    R: BufRead,
    S: TabularSink + ?Sized,
{
    for item in OsmElementReader::new(source) {
        let element = item?;
        match shape_element(&element, config) {
            Ok(record) => {
                sink.write_record(&record)?;
                summary.record(&record);
            }
            Err(err) => {
                warn!("Skipped element: {err}");
                summary.skipped += 1;
            }
        }
    }
    Ok(())
}

/// Stream `source` and tally postal code, street and phone values.
///
/// Values are classified as found; nothing is normalised or written.
///
/// # Errors
/// Returns [`SourceError`] when the input is malformed.
pub fn audit_map<R: BufRead>(
    source: R,
    suffixes: &StreetSuffixes,
) -> Result<AuditReport, SourceError> {
    let mut report = AuditReport::default();
    for item in OsmElementReader::new(source) {
        let element = item?;
        for tag in &element.tags {
            if let (Some(key), Some(value)) = (tag.get("k"), tag.get("v")) {
                report.observe_tag(key, value, suffixes);
            }
        }
    }
    Ok(report)
}
