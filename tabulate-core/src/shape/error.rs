use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::ElementKind;

/// Errors that exclude a single record from the output.
///
/// Both variants carry the element kind and, when it could be read, the
/// element identifier so the offending input can be located.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A column required by the output schema is absent.
    #[error("{kind} {} is missing required attribute `{attribute}`", describe_id(.id))]
    MissingAttribute {
        /// Kind of the offending element.
        kind: ElementKind,
        /// Identifier of the offending element, when readable.
        id: Option<i64>,
        /// Name of the absent attribute.
        attribute: &'static str,
    },
    /// An attribute is present but cannot be read as its column type.
    #[error(
        "{kind} {} has invalid `{attribute}` value {value:?}",
        describe_id(.id)
    )]
    InvalidAttribute {
        /// Kind of the offending element.
        kind: ElementKind,
        /// Identifier of the offending element, when readable.
        id: Option<i64>,
        /// Name of the malformed attribute.
        attribute: &'static str,
        /// Raw attribute text.
        value: String,
        /// Parser error for the column type.
        #[source]
        source: AttributeParseError,
    },
    /// A way references more nodes than a position column can index.
    #[error("way {id} has more node references than positions can represent")]
    TooManyNodeRefs {
        /// Identifier of the offending way.
        id: i64,
    },
}

/// Parser errors for typed columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeParseError {
    /// Integer columns (`id`, `uid`, `changeset`, `ref`).
    #[error(transparent)]
    Integer(#[from] ParseIntError),
    /// Coordinate columns (`lat`, `lon`).
    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

fn describe_id(id: &Option<i64>) -> String {
    id.map_or_else(|| "(without id)".to_owned(), |id| id.to_string())
}
