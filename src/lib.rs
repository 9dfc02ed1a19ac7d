//! Facade crate for the OpenStreetMap tabulation toolkit.
//!
//! This crate re-exports the field normalisers, auditors and element shaping
//! from `tabulate-core`, and the streaming reader, sinks and pipeline drivers
//! from `tabulate-data` behind the `data` feature.

#![forbid(unsafe_code)]

pub use tabulate_core::{
    AuditReport, Element, ElementKind, NodeRow, ShapeConfig, ShapeError, ShapedRecord,
    StreetSuffixes, TagRow, WayNodeRow, WayRow, normalize_phone, normalize_postal_code,
    normalize_street, shape_element,
};

#[cfg(feature = "data")]
pub use tabulate_data::{
    CsvSink, MemorySink, OsmElementReader, ProcessError, ProcessSummary, SinkError, SourceError,
    SqliteSink, TabularSink, audit_map, open_source, process_map,
};
