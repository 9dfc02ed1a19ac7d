//! CSV output: one file per relation in a single directory.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::{Dir, File};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use tabulate_core::ShapedRecord;
use tabulate_fs::ensure_dir;

use super::{Relation, SinkError, TabularSink};

const CSV_EXTENSION: &str = "csv";

/// Writes the relations to `nodes.csv`, `nodes_tags.csv`, `ways.csv`,
/// `ways_tags.csv` and `ways_nodes.csv`.
///
/// Each file starts with its header row, even when no rows follow.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use tabulate_data::{CsvSink, TabularSink};
///
/// # fn main() -> Result<(), tabulate_data::SinkError> {
/// let mut sink = CsvSink::create(Utf8Path::new("out"))?;
/// sink.finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CsvSink {
    nodes: Writer<File>,
    nodes_tags: Writer<File>,
    ways: Writer<File>,
    ways_tags: Writer<File>,
    ways_nodes: Writer<File>,
}

impl CsvSink {
    /// Create the output directory if needed and truncate the five files.
    ///
    /// # Errors
    /// Returns [`SinkError`] when the directory or a file cannot be created
    /// or a header row cannot be written.
    pub fn create(output_dir: &Utf8Path) -> Result<Self, SinkError> {
        let dir = ensure_dir(output_dir).map_err(|source| SinkError::CreateDirectory {
            path: output_dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            nodes: open_writer(&dir, output_dir, Relation::Nodes)?,
            nodes_tags: open_writer(&dir, output_dir, Relation::NodesTags)?,
            ways: open_writer(&dir, output_dir, Relation::Ways)?,
            ways_tags: open_writer(&dir, output_dir, Relation::WaysTags)?,
            ways_nodes: open_writer(&dir, output_dir, Relation::WaysNodes)?,
        })
    }

    /// File name used for `relation`.
    #[must_use]
    pub fn file_name(relation: Relation) -> String {
        format!("{}.{CSV_EXTENSION}", relation.name())
    }

    /// Path of the file holding `relation` under `output_dir`.
    #[must_use]
    pub fn relation_path(output_dir: &Utf8Path, relation: Relation) -> Utf8PathBuf {
        output_dir.join(Self::file_name(relation))
    }
}

impl TabularSink for CsvSink {
    fn write_record(&mut self, record: &ShapedRecord) -> Result<(), SinkError> {
        match record {
            ShapedRecord::Node { node, tags } => {
                write_row(&mut self.nodes, Relation::Nodes, node)?;
                for tag in tags {
                    write_row(&mut self.nodes_tags, Relation::NodesTags, tag)?;
                }
            }
            ShapedRecord::Way { way, nodes, tags } => {
                write_row(&mut self.ways, Relation::Ways, way)?;
                for way_node in nodes {
                    write_row(&mut self.ways_nodes, Relation::WaysNodes, way_node)?;
                }
                for tag in tags {
                    write_row(&mut self.ways_tags, Relation::WaysTags, tag)?;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        for (relation, writer) in [
            (Relation::Nodes, &mut self.nodes),
            (Relation::NodesTags, &mut self.nodes_tags),
            (Relation::Ways, &mut self.ways),
            (Relation::WaysTags, &mut self.ways_tags),
            (Relation::WaysNodes, &mut self.ways_nodes),
        ] {
            writer
                .flush()
                .map_err(|source| SinkError::Flush { relation, source })?;
        }
        Ok(())
    }
}

fn open_writer(
    dir: &Dir,
    output_dir: &Utf8Path,
    relation: Relation,
) -> Result<Writer<File>, SinkError> {
    let file_name = CsvSink::file_name(relation);
    let file = dir
        .create(&file_name)
        .map_err(|source| SinkError::CreateFile {
            path: output_dir.join(&file_name),
            source,
        })?;
    // Headers come from the column list so empty relations still get one.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer
        .write_record(relation.columns())
        .map_err(|source| SinkError::WriteCsv { relation, source })?;
    Ok(writer)
}

fn write_row<T: Serialize>(
    writer: &mut Writer<File>,
    relation: Relation,
    row: &T,
) -> Result<(), SinkError> {
    writer
        .serialize(row)
        .map_err(|source| SinkError::WriteCsv { relation, source })
}
