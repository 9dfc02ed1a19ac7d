//! Raw, hierarchical records as read from an OSM XML extract.
//!
//! An [`Element`] mirrors one top-level `<node>` or `<way>` together with its
//! nested `<tag>` and `<nd>` children. Values are kept as the source text;
//! typing happens during shaping so that a missing or malformed attribute can
//! be reported against the record that carried it.

use std::fmt;

/// The top-level element kinds that are shaped into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A `<node>` element: a single coordinate.
    Node,
    /// A `<way>` element: an ordered list of node references.
    Way,
}

impl ElementKind {
    /// Resolve an XML element name to a shaped kind.
    ///
    /// Returns `None` for `relation`, `bounds` and any unknown name.
    ///
    /// # Examples
    /// ```
    /// use tabulate_core::ElementKind;
    ///
    /// assert_eq!(ElementKind::from_name("way"), Some(ElementKind::Way));
    /// assert_eq!(ElementKind::from_name("relation"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "node" => Some(Self::Node),
            "way" => Some(Self::Way),
            _ => None,
        }
    }

    /// XML element name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered attribute list of a single XML element.
///
/// Lookups are linear; OSM elements carry a handful of attributes, so a
/// vector keeps source order without hashing overhead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an attribute, keeping source order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Value of the first attribute called `name`.
    ///
    /// # Examples
    /// ```
    /// use tabulate_core::Attributes;
    ///
    /// let attributes = Attributes::from_iter([("k", "amenity"), ("v", "cafe")]);
    /// assert_eq!(attributes.get("v"), Some("cafe"));
    /// assert_eq!(attributes.get("ref"), None);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// One top-level record with its nested children.
///
/// `tags` holds the attributes of each `<tag>` child (`k`, `v`) and
/// `node_refs` those of each `<nd>` child (`ref`), both in source order.
/// Nodes never carry node references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Whether this is a node or a way.
    pub kind: ElementKind,
    /// Attributes of the element itself.
    pub attributes: Attributes,
    /// Attributes of each nested `<tag>`.
    pub tags: Vec<Attributes>,
    /// Attributes of each nested `<nd>`.
    pub node_refs: Vec<Attributes>,
}

impl Element {
    /// Create an element without children.
    #[must_use]
    pub const fn new(kind: ElementKind, attributes: Attributes) -> Self {
        Self {
            kind,
            attributes,
            tags: Vec::new(),
            node_refs: Vec::new(),
        }
    }

    /// Identifier of the element, if present and numeric.
    ///
    /// Used to label diagnostics; shaping validates the identifier itself.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.attributes.get("id")?.trim().parse().ok()
    }
}
