//! Row types of the five output relations.
//!
//! Field order matches column order, so serialising a row with `serde`
//! yields the columns of the tabular contract in order:
//!
//! | relation     | columns                                                 |
//! |--------------|---------------------------------------------------------|
//! | `nodes`      | id, lat, lon, user, uid, version, changeset, timestamp  |
//! | `nodes_tags` | id, key, value, type                                    |
//! | `ways`       | id, user, uid, version, changeset, timestamp            |
//! | `ways_tags`  | id, key, value, type                                    |
//! | `ways_nodes` | id, node_id, position                                   |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ElementKind;

/// A row of the `nodes` relation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeRow {
    /// Node identifier.
    pub id: i64,
    /// Latitude in WGS84 degrees.
    pub lat: f64,
    /// Longitude in WGS84 degrees.
    pub lon: f64,
    /// Name of the last editor; may be empty.
    pub user: String,
    /// Identifier of the last editor.
    pub uid: i64,
    /// Element version.
    pub version: String,
    /// Changeset that produced this version.
    pub changeset: i64,
    /// Edit timestamp as written in the source.
    pub timestamp: String,
}

impl NodeRow {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 8] = [
        "id",
        "lat",
        "lon",
        "user",
        "uid",
        "version",
        "changeset",
        "timestamp",
    ];
}

/// A row of the `ways` relation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WayRow {
    /// Way identifier.
    pub id: i64,
    /// Name of the last editor; may be empty.
    pub user: String,
    /// Identifier of the last editor.
    pub uid: i64,
    /// Element version.
    pub version: String,
    /// Changeset that produced this version.
    pub changeset: i64,
    /// Edit timestamp as written in the source.
    pub timestamp: String,
}

impl WayRow {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 6] =
        ["id", "user", "uid", "version", "changeset", "timestamp"];
}

/// A row of the `nodes_tags` or `ways_tags` relation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagRow {
    /// Identifier of the owning node or way.
    pub id: i64,
    /// Key with the namespace prefix removed.
    pub key: String,
    /// Value, normalised for postal code, street and phone keys.
    pub value: String,
    /// Namespace prefix of the raw key, or the default tag type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub tag_type: String,
}

impl TagRow {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 4] = ["id", "key", "value", "type"];

    /// Rebuild the raw key this row was split from.
    ///
    /// # Examples
    /// ```
    /// use tabulate_core::TagRow;
    ///
    /// let row = TagRow {
    ///     id: 1,
    ///     key: "street:name".into(),
    ///     value: "Lincoln".into(),
    ///     tag_type: "addr".into(),
    /// };
    /// assert_eq!(row.original_key("regular"), "addr:street:name");
    /// ```
    #[must_use]
    pub fn original_key(&self, default_tag_type: &str) -> String {
        if self.tag_type == default_tag_type {
            self.key.clone()
        } else {
            format!("{}:{}", self.tag_type, self.key)
        }
    }
}

/// A row of the `ways_nodes` relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WayNodeRow {
    /// Identifier of the owning way.
    pub id: i64,
    /// Identifier of the referenced node; not checked for existence.
    pub node_id: i64,
    /// Zero-based position of the reference within the way.
    pub position: u32,
}

impl WayNodeRow {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 3] = ["id", "node_id", "position"];
}

/// Every row derived from one element, persisted as a unit.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapedRecord {
    /// Rows derived from a `<node>`.
    Node {
        /// The `nodes` row.
        node: NodeRow,
        /// The `nodes_tags` rows.
        tags: Vec<TagRow>,
    },
    /// Rows derived from a `<way>`.
    Way {
        /// The `ways` row.
        way: WayRow,
        /// The `ways_nodes` rows, in reference order.
        nodes: Vec<WayNodeRow>,
        /// The `ways_tags` rows.
        tags: Vec<TagRow>,
    },
}

impl ShapedRecord {
    /// Identifier of the shaped element.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Node { node, .. } => node.id,
            Self::Way { way, .. } => way.id,
        }
    }

    /// Kind of the shaped element.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Node { .. } => ElementKind::Node,
            Self::Way { .. } => ElementKind::Way,
        }
    }

    /// Tag rows of the element.
    #[must_use]
    pub fn tags(&self) -> &[TagRow] {
        match self {
            Self::Node { tags, .. } | Self::Way { tags, .. } => tags,
        }
    }
}
