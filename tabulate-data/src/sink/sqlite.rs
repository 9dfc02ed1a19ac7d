//! SQLite output: the five relations as tables of one database.

use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use rusqlite::{Connection, params};
use tabulate_core::{NodeRow, ShapedRecord, TagRow, WayNodeRow, WayRow};

use super::{Relation, SinkError, TabularSink};

/// Records inserted per transaction unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Foreign keys are declared for documentation and tooling but not
/// enforced: way node references may point at nodes outside the extract.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS nodes (
    id INTEGER PRIMARY KEY NOT NULL,
    lat REAL,
    lon REAL,
    user TEXT,
    uid INTEGER,
    version TEXT,
    changeset INTEGER,
    timestamp TEXT
);
CREATE TABLE IF NOT EXISTS nodes_tags (
    id INTEGER NOT NULL REFERENCES nodes (id),
    key TEXT,
    value TEXT,
    type TEXT
);
CREATE TABLE IF NOT EXISTS ways (
    id INTEGER PRIMARY KEY NOT NULL,
    user TEXT,
    uid INTEGER,
    version TEXT,
    changeset INTEGER,
    timestamp TEXT
);
CREATE TABLE IF NOT EXISTS ways_tags (
    id INTEGER NOT NULL REFERENCES ways (id),
    key TEXT,
    value TEXT,
    type TEXT
);
CREATE TABLE IF NOT EXISTS ways_nodes (
    id INTEGER NOT NULL REFERENCES ways (id),
    node_id INTEGER NOT NULL REFERENCES nodes (id),
    position INTEGER NOT NULL
);
";

const INSERT_NODE: &str = "INSERT INTO nodes (id, lat, lon, user, uid, version, changeset, timestamp) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const INSERT_NODE_TAG: &str = "INSERT INTO nodes_tags (id, key, value, type) VALUES (?1, ?2, ?3, ?4)";
const INSERT_WAY: &str = "INSERT INTO ways (id, user, uid, version, changeset, timestamp) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const INSERT_WAY_TAG: &str = "INSERT INTO ways_tags (id, key, value, type) VALUES (?1, ?2, ?3, ?4)";
const INSERT_WAY_NODE: &str = "INSERT INTO ways_nodes (id, node_id, position) VALUES (?1, ?2, ?3)";

/// Loads the relations into a SQLite database.
///
/// Rows are inserted inside a transaction that is committed every
/// `batch_size` records and on [`TabularSink::finish`]. Each record is
/// written under its own savepoint: a record whose inserts fail is rolled
/// back, so a later commit never stores part of a record.
#[derive(Debug)]
pub struct SqliteSink {
    connection: Connection,
    batch_size: NonZeroUsize,
    pending: usize,
}

impl SqliteSink {
    /// Open (or create) the database at `path` and create missing tables.
    ///
    /// # Errors
    /// Returns [`SinkError`] when the parent directory, the database or the
    /// schema cannot be created.
    pub fn create(path: &Utf8Path, batch_size: NonZeroUsize) -> Result<Self, SinkError> {
        ensure_parent_dir(path)?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| SinkError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_connection(connection, batch_size)
    }

    /// Use an already open connection, creating missing tables.
    ///
    /// # Errors
    /// Returns [`SinkError::CreateSchema`] when the tables cannot be created.
    pub fn from_connection(
        connection: Connection,
        batch_size: NonZeroUsize,
    ) -> Result<Self, SinkError> {
        connection
            .execute_batch(SCHEMA)
            .map_err(|source| SinkError::CreateSchema { source })?;
        Ok(Self {
            connection,
            batch_size,
            pending: 0,
        })
    }

    /// Borrow the underlying connection, for instance to query loaded rows.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        if self.connection.is_autocommit() {
            return Ok(());
        }
        self.connection
            .execute_batch("COMMIT")
            .map_err(|source| SinkError::Commit { source })?;
        debug!("Committed {} records to SQLite", self.pending);
        self.pending = 0;
        Ok(())
    }

    fn savepoint(&self, id: i64, sql: &str) -> Result<(), SinkError> {
        self.connection
            .execute_batch(sql)
            .map_err(|source| SinkError::Savepoint { id, source })
    }

    fn insert_record(&self, record: &ShapedRecord) -> Result<(), SinkError> {
        match record {
            ShapedRecord::Node { node, tags } => {
                self.insert_node(node)?;
                self.insert_tags(Relation::NodesTags, tags)
            }
            ShapedRecord::Way { way, nodes, tags } => {
                self.insert_way(way)?;
                self.insert_way_nodes(nodes)?;
                self.insert_tags(Relation::WaysTags, tags)
            }
        }
    }

    fn insert_node(&self, node: &NodeRow) -> Result<(), SinkError> {
        self.insert(
            Relation::Nodes,
            node.id,
            params![
                node.id,
                node.lat,
                node.lon,
                node.user,
                node.uid,
                node.version,
                node.changeset,
                node.timestamp
            ],
        )
    }

    fn insert_way(&self, way: &WayRow) -> Result<(), SinkError> {
        self.insert(
            Relation::Ways,
            way.id,
            params![
                way.id,
                way.user,
                way.uid,
                way.version,
                way.changeset,
                way.timestamp
            ],
        )
    }

    fn insert_tags(&self, relation: Relation, tags: &[TagRow]) -> Result<(), SinkError> {
        for tag in tags {
            self.insert(
                relation,
                tag.id,
                params![tag.id, tag.key, tag.value, tag.tag_type],
            )?;
        }
        Ok(())
    }

    fn insert_way_nodes(&self, way_nodes: &[WayNodeRow]) -> Result<(), SinkError> {
        for way_node in way_nodes {
            self.insert(
                Relation::WaysNodes,
                way_node.id,
                params![way_node.id, way_node.node_id, way_node.position],
            )?;
        }
        Ok(())
    }

    fn insert(
        &self,
        relation: Relation,
        id: i64,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<(), SinkError> {
        self.connection
            .prepare_cached(insert_sql(relation))
            .and_then(|mut statement| statement.execute(params))
            .map(|_| ())
            .map_err(|source| SinkError::Insert {
                relation,
                id,
                source,
            })
    }
}

impl TabularSink for SqliteSink {
    fn write_record(&mut self, record: &ShapedRecord) -> Result<(), SinkError> {
        if self.connection.is_autocommit() {
            self.connection
                .execute_batch("BEGIN")
                .map_err(|source| SinkError::BeginTransaction { source })?;
        }
        let id = record.id();
        self.savepoint(id, "SAVEPOINT record")?;
        if let Err(err) = self.insert_record(record) {
            self.savepoint(id, "ROLLBACK TO record; RELEASE record")?;
            return Err(err);
        }
        self.savepoint(id, "RELEASE record")?;
        self.pending += 1;
        if self.pending >= self.batch_size.get() {
            self.commit()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.commit()
    }
}

const fn insert_sql(relation: Relation) -> &'static str {
    match relation {
        Relation::Nodes => INSERT_NODE,
        Relation::NodesTags => INSERT_NODE_TAG,
        Relation::Ways => INSERT_WAY,
        Relation::WaysTags => INSERT_WAY_TAG,
        Relation::WaysNodes => INSERT_WAY_NODE,
    }
}

fn ensure_parent_dir(path: &Utf8Path) -> Result<(), SinkError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    tabulate_fs::ensure_dir(parent)
        .map(|_| ())
        .map_err(|source| SinkError::CreateDirectory {
            path: Utf8PathBuf::from(parent),
            source,
        })
}
