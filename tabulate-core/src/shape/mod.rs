//! Conversion of one hierarchical element into flat rows.
//!
//! A node yields one `nodes` row plus its tag rows; a way yields one `ways`
//! row, its tag rows and one `ways_nodes` row per node reference. Shaping is
//! all-or-nothing: a missing or malformed structural attribute rejects the
//! whole record, while malformed tag keys only drop the tag concerned.

mod config;
mod error;
pub mod keys;
mod tags;

use std::str::FromStr;

pub use config::{
    DEFAULT_TAG_TYPE, NAMESPACE_SEPARATOR, PROBLEM_CHARS, ShapeConfig, ValueNormalizer,
    has_problem_chars,
};
pub use error::{AttributeParseError, ShapeError};

use crate::rows::{NodeRow, ShapedRecord, WayRow};
use crate::{Attributes, Element, ElementKind};

/// Shape `element` into the rows of its relations.
///
/// # Errors
/// Returns [`ShapeError::MissingAttribute`] when the element, one of its
/// tags (`k`, `v`) or one of its node references (`ref`) lacks a required
/// attribute, and [`ShapeError::InvalidAttribute`] when a numeric attribute
/// does not parse.
///
/// # Examples
/// ```
/// use tabulate_core::{Attributes, Element, ElementKind, ShapeConfig, ShapedRecord, shape_element};
///
/// let mut element = Element::new(
///     ElementKind::Node,
///     Attributes::from_iter([
///         ("id", "42"),
///         ("lat", "40.7484"),
///         ("lon", "-73.9857"),
///         ("user", "mapper"),
///         ("uid", "7"),
///         ("version", "3"),
///         ("changeset", "1001"),
///         ("timestamp", "2016-01-01T00:00:00Z"),
///     ]),
/// );
/// element
///     .tags
///     .push(Attributes::from_iter([("k", "addr:postcode"), ("v", "NY 10118")]));
///
/// let shaped = shape_element(&element, &ShapeConfig::default())?;
/// let ShapedRecord::Node { node, tags } = shaped else {
///     panic!("expected a node");
/// };
/// assert_eq!(node.id, 42);
/// assert_eq!(tags[0].tag_type, "addr");
/// assert_eq!(tags[0].key, "postcode");
/// assert_eq!(tags[0].value, "10118");
/// # Ok::<(), tabulate_core::ShapeError>(())
/// ```
pub fn shape_element(element: &Element, config: &ShapeConfig) -> Result<ShapedRecord, ShapeError> {
    let reader = AttributeReader::new(element);
    match element.kind {
        ElementKind::Node => {
            let node = NodeRow {
                id: reader.integer("id")?,
                lat: reader.float("lat")?,
                lon: reader.float("lon")?,
                user: reader.text("user")?.to_owned(),
                uid: reader.integer("uid")?,
                version: reader.text("version")?.to_owned(),
                changeset: reader.integer("changeset")?,
                timestamp: reader.text("timestamp")?.to_owned(),
            };
            let tags = tags::shape_tags(&reader, node.id, &element.tags, config)?;
            Ok(ShapedRecord::Node { node, tags })
        }
        ElementKind::Way => {
            let way = WayRow {
                id: reader.integer("id")?,
                user: reader.text("user")?.to_owned(),
                uid: reader.integer("uid")?,
                version: reader.text("version")?.to_owned(),
                changeset: reader.integer("changeset")?,
                timestamp: reader.text("timestamp")?.to_owned(),
            };
            let tags = tags::shape_tags(&reader, way.id, &element.tags, config)?;
            let nodes = tags::shape_way_nodes(&reader, way.id, &element.node_refs)?;
            Ok(ShapedRecord::Way { way, nodes, tags })
        }
    }
}

/// Typed attribute access that labels failures with the owning record.
struct AttributeReader<'a> {
    kind: ElementKind,
    id: Option<i64>,
    attributes: &'a Attributes,
}

impl<'a> AttributeReader<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            kind: element.kind,
            id: element.id(),
            attributes: &element.attributes,
        }
    }

    /// Reader over a child's attributes, reporting against the same record.
    const fn child<'b>(&self, attributes: &'b Attributes) -> AttributeReader<'b> {
        AttributeReader {
            kind: self.kind,
            id: self.id,
            attributes,
        }
    }

    fn text(&self, attribute: &'static str) -> Result<&'a str, ShapeError> {
        self.attributes
            .get(attribute)
            .ok_or(ShapeError::MissingAttribute {
                kind: self.kind,
                id: self.id,
                attribute,
            })
    }

    fn integer(&self, attribute: &'static str) -> Result<i64, ShapeError> {
        self.parsed(attribute)
    }

    fn float(&self, attribute: &'static str) -> Result<f64, ShapeError> {
        self.parsed(attribute)
    }

    fn parsed<T>(&self, attribute: &'static str) -> Result<T, ShapeError>
    where
        T: FromStr,
        T::Err: Into<AttributeParseError>,
    {
        let raw = self.text(attribute)?;
        raw.trim()
            .parse()
            .map_err(|source: T::Err| ShapeError::InvalidAttribute {
                kind: self.kind,
                id: self.id,
                attribute,
                value: raw.to_owned(),
                source: source.into(),
            })
    }
}

#[cfg(test)]
mod tests;
