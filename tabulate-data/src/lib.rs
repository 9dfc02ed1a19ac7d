//! Streaming input and tabular output for OpenStreetMap extracts.
//!
//! Responsibilities:
//! - Read OSM XML (optionally bzip2-compressed) one record at a time.
//! - Persist shaped rows to CSV files or SQLite.
//! - Drive the processing and audit passes end to end.
//!
//! Boundaries:
//! - Do not encode field rules (live in `tabulate-core`).
//! - Memory use is bounded by the largest single record, not the extract.
//!
//! Invariants:
//! - Sinks only ever receive fully shaped records.
//! - No global mutable state.
#![forbid(unsafe_code)]

mod pipeline;
mod sink;
mod source;
mod traversal;

pub use pipeline::{ProcessError, ProcessSummary, audit_map, process_map};
pub use sink::{
    CsvSink, DEFAULT_BATCH_SIZE, MemorySink, Relation, SinkError, SqliteSink, TabularSink,
};
pub use source::{BZIP2_EXTENSION, OpenSourceError, open_source};
pub use traversal::{OsmElementReader, SourceError};
