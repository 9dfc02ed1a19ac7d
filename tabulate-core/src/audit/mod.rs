//! Read-only classification of raw field values for human review.
//!
//! Auditing is distinct from normalisation: it never alters a value, it
//! only files it into caller-owned tables so inconsistent formats can be
//! spotted before the mappings used by the normalisers are settled.

mod area;
mod tables;

use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::normalize::{StreetSuffixes, format_signature};
use crate::shape::keys;

pub use area::{AreaRule, OTHER_AREA, POSTAL_AREA_RULES, classify_postal_area};
pub use tables::{AreaTally, FormatTally, StreetTypeGroups};

/// Trailing token of a street name: a run of non-whitespace characters,
/// optionally followed by a period, anchored to the end (a single trailing
/// line break is tolerated).
#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal and is covered by tests"
)]
static STREET_TYPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\S+\.?)\n?$").expect("street type pattern is valid"));

/// Tally the format signature and area of a postal code.
///
/// # Examples
/// ```
/// use tabulate_core::audit::{AreaTally, FormatTally, audit_postal_code};
///
/// let mut formats = FormatTally::default();
/// let mut areas = AreaTally::default();
/// audit_postal_code(&mut formats, &mut areas, "NY 10065");
///
/// assert_eq!(formats.count("NY XXXXX"), 1);
/// assert_eq!(areas.count("Manhattan"), 1);
/// ```
pub fn audit_postal_code(formats: &mut FormatTally, areas: &mut AreaTally, raw: &str) {
    formats.record(format_signature(raw));
    areas.record(classify_postal_area(raw));
}

/// Tally the format signature of a phone number.
pub fn audit_phone_number(formats: &mut FormatTally, raw: &str) {
    formats.record(format_signature(raw));
}

/// Extract the trailing street type token of `street_name`.
///
/// # Examples
/// ```
/// use tabulate_core::audit::street_type;
///
/// assert_eq!(street_type("123 Main St."), Some("St."));
/// assert_eq!(street_type("Broadway"), Some("Broadway"));
/// assert_eq!(street_type("   "), None);
/// ```
#[must_use]
pub fn street_type(street_name: &str) -> Option<&str> {
    STREET_TYPE_PATTERN
        .captures(street_name)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str())
}

/// File `street_name` under its suffix unless the suffix is canonical.
pub fn audit_street_type(
    groups: &mut StreetTypeGroups,
    suffixes: &StreetSuffixes,
    street_name: &str,
) {
    if let Some(suffix) = street_type(street_name)
        && !suffixes.is_expected(suffix)
    {
        groups.record(suffix, street_name);
    }
}

/// Every table produced by one audit pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AuditReport {
    /// Format signatures of `addr:postcode` values.
    pub postal_code_formats: FormatTally,
    /// Areas of `addr:postcode` values.
    pub postal_code_areas: AreaTally,
    /// Non-canonical `addr:street` suffixes and the names carrying them.
    pub street_types: StreetTypeGroups,
    /// Format signatures of `phone` and `contact:phone` values.
    pub phone_number_formats: FormatTally,
}

impl AuditReport {
    /// Route one raw tag to the auditor responsible for its key.
    ///
    /// Keys without an auditor are ignored.
    ///
    /// # Examples
    /// ```
    /// use tabulate_core::{AuditReport, StreetSuffixes};
    ///
    /// let suffixes = StreetSuffixes::default();
    /// let mut report = AuditReport::default();
    /// report.observe_tag("contact:phone", "(212) 333-3100", &suffixes);
    /// report.observe_tag("addr:street", "Canal St", &suffixes);
    /// report.observe_tag("name", "Joe's Pizza", &suffixes);
    ///
    /// assert_eq!(report.phone_number_formats.count("(XXX) XXX-XXXX"), 1);
    /// assert!(report.street_types.names("St").is_some());
    /// ```
    pub fn observe_tag(&mut self, key: &str, value: &str, suffixes: &StreetSuffixes) {
        if key == keys::POSTCODE {
            audit_postal_code(
                &mut self.postal_code_formats,
                &mut self.postal_code_areas,
                value,
            );
        } else if key == keys::STREET {
            audit_street_type(&mut self.street_types, suffixes, value);
        } else if keys::PHONE.contains(&key) {
            audit_phone_number(&mut self.phone_number_formats, value);
        }
    }
}
