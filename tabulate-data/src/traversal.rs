//! Streaming traversal of OSM XML.
//!
//! [`OsmElementReader`] pulls events from `quick-xml` and assembles one
//! top-level `<node>` or `<way>` at a time. Only the record being built is
//! held in memory; it is handed to the caller as soon as its end tag is
//! read.

use std::io::BufRead;

use log::trace;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use tabulate_core::{Attributes, Element, ElementKind};
use thiserror::Error;

/// Depth of the document root once opened.
const ROOT_DEPTH: usize = 1;
/// Depth of the children of a top-level record.
const CHILD_DEPTH: usize = ROOT_DEPTH + 1;

/// Errors that end a traversal.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The XML is malformed.
    #[error("malformed XML near byte {position}")]
    Xml {
        /// Byte offset reached when the error was detected.
        position: u64,
        /// Parser error.
        #[source]
        source: quick_xml::Error,
    },
    /// The input ended while elements were still open.
    #[error("input ended with {open} unclosed element(s)")]
    Truncated {
        /// Number of elements left open.
        open: usize,
    },
    /// The input holds no root element.
    #[error("document has no root element")]
    EmptyDocument,
    /// Another top-level element follows the closed root.
    #[error("unexpected <{name}> after the document root near byte {position}")]
    TrailingContent {
        /// Name of the extra top-level element.
        name: String,
        /// Byte offset reached when the element was read.
        position: u64,
    },
}

/// Iterator over the shaped kinds of an OSM XML document.
///
/// Records are yielded in document order once complete. `relation`,
/// `bounds` and any other top-level element are skipped without their
/// subtree being collected. The iterator is fused after the first error.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use tabulate_core::ElementKind;
/// use tabulate_data::OsmElementReader;
///
/// let xml = r#"<osm>
///   <node id="1" lat="40.7" lon="-74.0"/>
///   <relation id="9"><member ref="1"/></relation>
///   <way id="2"><nd ref="1"/><tag k="highway" v="path"/></way>
/// </osm>"#;
/// let kinds: Vec<ElementKind> = OsmElementReader::new(Cursor::new(xml))
///     .map(|element| element.map(|element| element.kind))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(kinds, [ElementKind::Node, ElementKind::Way]);
/// # Ok::<(), tabulate_data::SourceError>(())
/// ```
pub struct OsmElementReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    skip_buf: Vec<u8>,
    depth: usize,
    current: Option<Element>,
    seen_root: bool,
    finished: bool,
}

impl<R: BufRead> OsmElementReader<R> {
    /// Wrap a buffered XML source.
    pub fn new(source: R) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            skip_buf: Vec::new(),
            depth: 0,
            current: None,
            seen_root: false,
            finished: false,
        }
    }

    fn next_element(&mut self) -> Result<Option<Element>, SourceError> {
        let Self {
            reader,
            buf,
            skip_buf,
            depth,
            current,
            seen_root,
            ..
        } = self;
        loop {
            buf.clear();
            let event = reader
                .read_event_into(buf)
                .map_err(|source| xml_error(reader, source))?;
            match event {
                Event::Start(start) => {
                    if *depth == 0 {
                        open_root(reader, seen_root, &start)?;
                    } else if *depth == ROOT_DEPTH {
                        match shaped_kind(&start) {
                            Some(kind) => {
                                *current =
                                    Some(Element::new(kind, read_attributes(reader, &start)?));
                            }
                            None => {
                                let name = start.name().as_ref().to_vec();
                                skip_buf.clear();
                                reader
                                    .read_to_end_into(QName(&name), skip_buf)
                                    .map_err(|source| xml_error(reader, source))?;
                                trace!("Skipped top-level <{}>", String::from_utf8_lossy(&name));
                                continue;
                            }
                        }
                    } else if *depth == CHILD_DEPTH
                        && let Some(element) = current.as_mut()
                    {
                        attach_child(reader, element, &start)?;
                    }
                    *depth += 1;
                }
                Event::Empty(start) => {
                    if *depth == 0 {
                        open_root(reader, seen_root, &start)?;
                    } else if *depth == ROOT_DEPTH {
                        if let Some(kind) = shaped_kind(&start) {
                            return Ok(Some(Element::new(
                                kind,
                                read_attributes(reader, &start)?,
                            )));
                        }
                    } else if *depth == CHILD_DEPTH
                        && let Some(element) = current.as_mut()
                    {
                        attach_child(reader, element, &start)?;
                    }
                }
                Event::End(_) => {
                    *depth = depth.saturating_sub(1);
                    if *depth == ROOT_DEPTH
                        && let Some(element) = current.take()
                    {
                        return Ok(Some(element));
                    }
                }
                Event::Eof => {
                    if *depth > 0 {
                        return Err(SourceError::Truncated { open: *depth });
                    }
                    if !*seen_root {
                        return Err(SourceError::EmptyDocument);
                    }
                    return Ok(None);
                }
                Event::Text(_)
                | Event::CData(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_) => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for OsmElementReader<R> {
    type Item = Result<Element, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_element() {
            Ok(Some(element)) => Some(Ok(element)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for OsmElementReader<R> {}

/// Mark the root as seen, rejecting a second top-level element.
fn open_root<R>(
    reader: &Reader<R>,
    seen_root: &mut bool,
    start: &BytesStart<'_>,
) -> Result<(), SourceError> {
    if *seen_root {
        return Err(SourceError::TrailingContent {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            position: position(reader),
        });
    }
    *seen_root = true;
    Ok(())
}

fn shaped_kind(start: &BytesStart<'_>) -> Option<ElementKind> {
    std::str::from_utf8(start.name().as_ref())
        .ok()
        .and_then(ElementKind::from_name)
}

/// Record a `<tag>` or `<nd>` child; other children are ignored.
fn attach_child<R>(
    reader: &Reader<R>,
    element: &mut Element,
    start: &BytesStart<'_>,
) -> Result<(), SourceError> {
    match (start.name().as_ref(), element.kind) {
        (b"tag", _) => element.tags.push(read_attributes(reader, start)?),
        (b"nd", ElementKind::Way) => element.node_refs.push(read_attributes(reader, start)?),
        _ => {}
    }
    Ok(())
}

fn read_attributes<R>(reader: &Reader<R>, start: &BytesStart<'_>) -> Result<Attributes, SourceError> {
    let mut attributes = Attributes::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|source| xml_error(reader, source.into()))?;
        let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|source| xml_error(reader, source))?;
        attributes.push(name, value);
    }
    Ok(attributes)
}

fn xml_error<R>(reader: &Reader<R>, source: quick_xml::Error) -> SourceError {
    SourceError::Xml {
        position: position(reader),
        source,
    }
}

fn position<R>(reader: &Reader<R>) -> u64 {
    u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX)
}
