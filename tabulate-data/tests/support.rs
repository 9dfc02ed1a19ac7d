use std::io::Write;
use std::path::PathBuf;

use bzip2::Compression;
use bzip2::write::BzEncoder;
use camino::Utf8PathBuf;
use tempfile::TempDir;

/// Directory containing the XML fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture as text.
pub fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"))
}

/// Convert a temporary path to UTF-8.
pub fn utf8(path: PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path)
        .unwrap_or_else(|path| panic!("temporary path {path:?} is not UTF-8"))
}

/// Write `contents` to `name` under `dir`, compressing when the name ends
/// in `.bz2`.
pub fn write_extract(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = utf8(dir.path().join(name));
    let bytes = if name.ends_with(".bz2") {
        let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(contents.as_bytes())
            .unwrap_or_else(|err| panic!("failed to compress {name}: {err}"));
        encoder
            .finish()
            .unwrap_or_else(|err| panic!("failed to finish {name}: {err}"))
    } else {
        contents.as_bytes().to_vec()
    };
    std::fs::write(&path, bytes).unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
    path
}
