//! Core domain logic for turning OpenStreetMap extracts into flat tables.
//!
//! The crate is free of I/O. It defines:
//! - the raw [`Element`] model produced by a streaming reader;
//! - the row types of the five output relations ([`NodeRow`], [`WayRow`],
//!   [`TagRow`], [`WayNodeRow`]);
//! - field normalisers for postal codes, street suffixes and phone numbers;
//! - auditors that tally raw value shapes for human review; and
//! - [`shape_element`], which converts one element into its rows.
//!
//! Invariants:
//! - No global mutable state. Audit tables are owned by the caller.
//! - Shaping either produces every row of a record or none of them.

#![forbid(unsafe_code)]

pub mod audit;
pub mod element;
pub mod normalize;
pub mod rows;
pub mod shape;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use audit::{AreaTally, AuditReport, FormatTally, StreetTypeGroups};
pub use element::{Attributes, Element, ElementKind};
pub use normalize::{
    StreetSuffixes, SuffixMapping, normalize_phone, normalize_postal_code, normalize_street,
};
pub use rows::{NodeRow, ShapedRecord, TagRow, WayNodeRow, WayRow};
pub use shape::{ShapeConfig, ShapeError, ValueNormalizer, shape_element};
