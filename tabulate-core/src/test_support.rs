//! Builders for elements used in tests across the workspace.
//!
//! Enabled for this crate's own tests and, for other crates, through the
//! `test-support` feature.

use crate::{Attributes, Element, ElementKind};

/// Timestamp used by the sample builders.
pub const SAMPLE_TIMESTAMP: &str = "2016-06-26T18:42:10Z";

/// Fluent construction of [`Element`] values.
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    /// A node carrying every attribute of the `nodes` relation.
    #[must_use]
    pub fn node(id: i64) -> Self {
        Self::bare(ElementKind::Node)
            .attribute("id", id.to_string())
            .attribute("lat", "40.7484405")
            .attribute("lon", "-73.9856644")
            .with_edit_metadata()
    }

    /// A way carrying every attribute of the `ways` relation.
    #[must_use]
    pub fn way(id: i64) -> Self {
        Self::bare(ElementKind::Way)
            .attribute("id", id.to_string())
            .with_edit_metadata()
    }

    /// An element without attributes.
    #[must_use]
    pub const fn bare(kind: ElementKind) -> Self {
        Self {
            element: Element::new(kind, Attributes::new()),
        }
    }

    /// Append an attribute to the element.
    #[must_use]
    pub fn attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.element.attributes.push(name, value);
        self
    }

    /// Drop every attribute called `name`.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.element.attributes = self
            .element
            .attributes
            .iter()
            .filter(|(candidate, _)| *candidate != name)
            .collect();
        self
    }

    /// Append a `<tag k v>` child.
    #[must_use]
    pub fn tag(self, key: &str, value: &str) -> Self {
        self.raw_tag(Attributes::from_iter([("k", key), ("v", value)]))
    }

    /// Append a `<tag>` child with arbitrary attributes.
    #[must_use]
    pub fn raw_tag(mut self, attributes: Attributes) -> Self {
        self.element.tags.push(attributes);
        self
    }

    /// Append an `<nd ref>` child.
    #[must_use]
    pub fn node_ref(mut self, node_id: i64) -> Self {
        self.element
            .node_refs
            .push(Attributes::from_iter([("ref", node_id.to_string())]));
        self
    }

    /// Append an `<nd>` child with arbitrary attributes.
    #[must_use]
    pub fn raw_node_ref(mut self, attributes: Attributes) -> Self {
        self.element.node_refs.push(attributes);
        self
    }

    /// Finish the element.
    #[must_use]
    pub fn build(self) -> Element {
        self.element
    }

    fn with_edit_metadata(self) -> Self {
        self.attribute("user", "mapper")
            .attribute("uid", "1001")
            .attribute("version", "2")
            .attribute("changeset", "40012345")
            .attribute("timestamp", SAMPLE_TIMESTAMP)
    }
}
