//! Opening extracts from disk.

use std::io::{self, BufRead, BufReader};

use bzip2::read::MultiBzDecoder;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use tabulate_fs::open_utf8_file;
use thiserror::Error;

/// Extension of bzip2-compressed extracts, as distributed by OSM mirrors.
pub const BZIP2_EXTENSION: &str = "bz2";

/// Errors raised when an extract cannot be opened.
#[derive(Debug, Error)]
pub enum OpenSourceError {
    /// The file could not be opened.
    #[error("failed to open OSM extract at {path}")]
    Open {
        /// Path of the extract.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Open an OSM XML extract for streaming.
///
/// Files ending in `.bz2` are decompressed on the fly; decompression errors
/// surface later as read errors of the traversal.
///
/// # Errors
/// Returns [`OpenSourceError::Open`] when the file cannot be opened.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use tabulate_data::{OsmElementReader, open_source};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = open_source(Utf8Path::new("manhattan.osm.bz2"))?;
/// let elements = OsmElementReader::new(source).count();
/// println!("{elements} elements");
/// # Ok(())
/// # }
/// ```
pub fn open_source(path: &Utf8Path) -> Result<Box<dyn BufRead>, OpenSourceError> {
    let file = open_utf8_file(path).map_err(|source| OpenSourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension() == Some(BZIP2_EXTENSION) {
        debug!("Decompressing {path} as bzip2");
        Ok(Box::new(BufReader::new(MultiBzDecoder::new(
            BufReader::new(file),
        ))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
