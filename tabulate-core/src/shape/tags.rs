//! Tag and node-reference rows of a single element.
//!
//! Provides helpers to:
//! - drop tags whose raw key carries a problem character;
//! - split namespaced keys at the first separator; and
//! - number way node references by position.
use log::debug;

use super::config::{NAMESPACE_SEPARATOR, ShapeConfig, has_problem_chars};
use super::{AttributeReader, ShapeError};
use crate::rows::{TagRow, WayNodeRow};
use crate::Attributes;

pub(super) fn shape_tags(
    reader: &AttributeReader<'_>,
    owner_id: i64,
    tags: &[Attributes],
    config: &ShapeConfig,
) -> Result<Vec<TagRow>, ShapeError> {
    let mut rows = Vec::with_capacity(tags.len());
    for tag in tags {
        let child = reader.child(tag);
        let raw_key = child.text("k")?;
        if has_problem_chars(raw_key) {
            debug!("Dropped tag with problem characters: owner={owner_id}, key={raw_key:?}");
            continue;
        }
        let raw_value = child.text("v")?;
        let (tag_type, key) = split_key(raw_key, config.default_tag_type());
        rows.push(TagRow {
            id: owner_id,
            key: key.to_owned(),
            value: config.normalize_value(raw_key, raw_value),
            tag_type: tag_type.to_owned(),
        });
    }
    Ok(rows)
}

pub(super) fn shape_way_nodes(
    reader: &AttributeReader<'_>,
    way_id: i64,
    node_refs: &[Attributes],
) -> Result<Vec<WayNodeRow>, ShapeError> {
    node_refs
        .iter()
        .enumerate()
        .map(|(index, node_ref)| {
            let position =
                u32::try_from(index).map_err(|_| ShapeError::TooManyNodeRefs { id: way_id })?;
            Ok(WayNodeRow {
                id: way_id,
                node_id: reader.child(node_ref).integer("ref")?,
                position,
            })
        })
        .collect()
}

/// Split `raw_key` into `(type, key)` at the first namespace separator.
///
/// Keys without a separator keep their text and receive `default_tag_type`.
pub(super) fn split_key<'a>(raw_key: &'a str, default_tag_type: &'a str) -> (&'a str, &'a str) {
    raw_key
        .split_once(NAMESPACE_SEPARATOR)
        .unwrap_or((default_tag_type, raw_key))
}
