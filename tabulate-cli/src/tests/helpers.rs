//! Test helpers for writing extracts and output directories to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write as _;
use tempfile::TempDir;

/// A small Midtown extract: two shapeable nodes, one node without a
/// latitude, one way and a relation.
pub(super) const EXTRACT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <node id="1001" lat="40.7484405" lon="-73.9856644" version="7" timestamp="2016-03-14T09:12:44Z" changeset="37912345" uid="1781" user="nycmapper">
    <tag k="name" v="Empire State Building"/>
    <tag k="addr:street" v="5th Ave"/>
    <tag k="addr:postcode" v="10118-0110"/>
    <tag k="phone" v="(212) 736-3100"/>
  </node>
  <node id="1002" lat="40.7489" lon="-73.9860" version="2" timestamp="2015-11-02T17:05:10Z" changeset="35012345" uid="2202" user="">
    <tag k="amenity" v="cafe"/>
  </node>
  <node id="1003" lon="-73.9849" version="1" timestamp="2015-11-02T17:05:10Z" changeset="35012345" uid="2202" user=""/>
  <way id="2001" version="4" timestamp="2016-05-20T12:00:00Z" changeset="39456789" uid="1781" user="nycmapper">
    <nd ref="1001"/>
    <nd ref="1002"/>
    <tag k="highway" v="footway"/>
    <tag k="addr:street" v="West 34th St"/>
  </way>
  <relation id="3001" version="1" timestamp="2016-05-20T12:00:00Z" changeset="39456789" uid="1781" user="nycmapper">
    <tag k="addr:postcode" v="11201"/>
  </relation>
</osm>
"#;

/// Temporary workspace holding extracts and outputs for one test.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write `contents` as `name`, compressing when the name ends in `.bz2`.
    pub(super) fn write_extract(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        if name.ends_with(".bz2") {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder
                .write_all(contents.as_bytes())
                .expect("compress extract");
            write_utf8(&path, &encoder.finish().expect("finish compression"));
        } else {
            write_utf8(&path, contents.as_bytes());
        }
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

pub(super) fn read_utf8(path: &Utf8Path) -> String {
    std::fs::read_to_string(path.as_std_path()).expect("read file")
}
