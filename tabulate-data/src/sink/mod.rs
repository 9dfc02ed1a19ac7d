//! Destinations for shaped rows.
//!
//! A [`TabularSink`] receives one [`ShapedRecord`] at a time and persists its
//! rows into the five relations. Records arrive in traversal order and are
//! written whole; sinks never see a partially shaped record.

mod csv;
mod memory;
mod sqlite;

use std::fmt;
use std::io;

use camino::Utf8PathBuf;
use tabulate_core::{NodeRow, ShapedRecord, TagRow, WayNodeRow, WayRow};
use thiserror::Error;

pub use self::csv::CsvSink;
pub use self::memory::MemorySink;
pub use self::sqlite::{DEFAULT_BATCH_SIZE, SqliteSink};

/// Store that persists the rows of shaped records.
pub trait TabularSink {
    /// Persist every row derived from one element.
    ///
    /// # Errors
    /// Returns [`SinkError`] when the underlying store rejects a row.
    fn write_record(&mut self, record: &ShapedRecord) -> Result<(), SinkError>;

    /// Flush buffered rows so that everything written so far is durable.
    ///
    /// # Errors
    /// Returns [`SinkError`] when flushing or committing fails.
    fn finish(&mut self) -> Result<(), SinkError>;
}

/// The five output relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// One row per node.
    Nodes,
    /// Tags of nodes.
    NodesTags,
    /// One row per way.
    Ways,
    /// Tags of ways.
    WaysTags,
    /// Ordered node references of ways.
    WaysNodes,
}

impl Relation {
    /// Every relation, in the order tables are created.
    pub const ALL: [Self; 5] = [
        Self::Nodes,
        Self::NodesTags,
        Self::Ways,
        Self::WaysTags,
        Self::WaysNodes,
    ];

    /// Table name of the relation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nodes => "nodes",
            Self::NodesTags => "nodes_tags",
            Self::Ways => "ways",
            Self::WaysTags => "ways_tags",
            Self::WaysNodes => "ways_nodes",
        }
    }

    /// Column names in output order.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Nodes => &NodeRow::COLUMNS,
            Self::NodesTags | Self::WaysTags => &TagRow::COLUMNS,
            Self::Ways => &WayRow::COLUMNS,
            Self::WaysNodes => &WayNodeRow::COLUMNS,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while persisting rows. All of them end the run.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An output file could not be created.
    #[error("failed to create output file {path}")]
    CreateFile {
        /// File that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Writing a CSV row failed.
    #[error("failed to write a {relation} row")]
    WriteCsv {
        /// Relation being written.
        relation: Relation,
        /// Source error returned by `csv`.
        #[source]
        source: ::csv::Error,
    },
    /// Flushing a CSV file failed.
    #[error("failed to flush {relation} output")]
    Flush {
        /// Relation being flushed.
        relation: Relation,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    OpenDatabase {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the tables failed.
    #[error("failed to create SQLite schema")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Beginning a transaction failed.
    #[error("failed to begin SQLite transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Inserting a row failed.
    #[error("failed to insert {relation} row for element {id}")]
    Insert {
        /// Relation being written.
        relation: Relation,
        /// Identifier of the element the row belongs to.
        id: i64,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Committing a transaction failed.
    #[error("failed to commit SQLite transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Opening, releasing or rolling back a per-record savepoint failed.
    #[error("failed to manage SQLite savepoint for element {id}")]
    Savepoint {
        /// Identifier of the element being written.
        id: i64,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}
