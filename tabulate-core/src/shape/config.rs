//! Immutable shaping configuration.

use std::collections::BTreeMap;

use super::keys;
use crate::normalize::{StreetSuffixes, normalize_phone, normalize_postal_code};

/// Tag type recorded for keys without a namespace prefix.
pub const DEFAULT_TAG_TYPE: &str = "regular";

/// Separator between a key's namespace prefix and the rest of the key.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Characters that disqualify a raw tag key.
pub const PROBLEM_CHARS: [char; 20] = [
    '=', '+', '/', '&', '<', '>', ';', '\'', '"', '?', '%', '#', '$', '@', ',', '.', ' ', '\t',
    '\r', '\n',
];

/// Whether `raw_key` contains any of [`PROBLEM_CHARS`].
///
/// # Examples
/// ```
/// use tabulate_core::shape::has_problem_chars;
///
/// assert!(has_problem_chars("name, alt"));
/// assert!(!has_problem_chars("addr:street"));
/// ```
#[must_use]
pub fn has_problem_chars(raw_key: &str) -> bool {
    raw_key.contains(PROBLEM_CHARS.as_slice())
}

/// Normaliser applied to the value of a tag, chosen by its raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueNormalizer {
    /// [`normalize_postal_code`].
    PostalCode,
    /// [`StreetSuffixes::normalize`].
    Street,
    /// [`normalize_phone`].
    Phone,
}

/// Settings consulted by [`shape_element`](super::shape_element).
///
/// The defaults reproduce the Manhattan wrangling rules: unprefixed keys get
/// the `regular` type; `addr:postcode`, `addr:street`, `phone` and
/// `contact:phone` values are normalised.
///
/// # Examples
/// ```
/// use tabulate_core::{ShapeConfig, ValueNormalizer};
///
/// let config = ShapeConfig::default().with_normalizer("fax", ValueNormalizer::Phone);
/// assert_eq!(config.normalize_value("fax", "212 555 0100"), "+1-212-555-0100");
/// assert_eq!(config.normalize_value("name", "212 555 0100"), "212 555 0100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeConfig {
    default_tag_type: String,
    normalizers: BTreeMap<String, ValueNormalizer>,
    street_suffixes: StreetSuffixes,
}

impl ShapeConfig {
    /// Replace the tag type used for unprefixed keys.
    #[must_use]
    pub fn with_default_tag_type(mut self, tag_type: impl Into<String>) -> Self {
        self.default_tag_type = tag_type.into();
        self
    }

    /// Route values of `raw_key` through `normalizer`.
    #[must_use]
    pub fn with_normalizer(mut self, raw_key: impl Into<String>, normalizer: ValueNormalizer) -> Self {
        self.normalizers.insert(raw_key.into(), normalizer);
        self
    }

    /// Pass values of `raw_key` through unchanged.
    #[must_use]
    pub fn without_normalizer(mut self, raw_key: &str) -> Self {
        self.normalizers.remove(raw_key);
        self
    }

    /// Replace the street suffix tables.
    #[must_use]
    pub fn with_street_suffixes(mut self, street_suffixes: StreetSuffixes) -> Self {
        self.street_suffixes = street_suffixes;
        self
    }

    /// Tag type used for unprefixed keys.
    #[must_use]
    pub fn default_tag_type(&self) -> &str {
        &self.default_tag_type
    }

    /// Street suffix tables used by [`ValueNormalizer::Street`].
    #[must_use]
    pub const fn street_suffixes(&self) -> &StreetSuffixes {
        &self.street_suffixes
    }

    /// Normaliser registered for `raw_key`, if any.
    #[must_use]
    pub fn normalizer_for(&self, raw_key: &str) -> Option<ValueNormalizer> {
        self.normalizers.get(raw_key).copied()
    }

    /// Output value for a tag, selected by its unsplit key.
    #[must_use]
    pub fn normalize_value(&self, raw_key: &str, raw_value: &str) -> String {
        match self.normalizer_for(raw_key) {
            Some(ValueNormalizer::PostalCode) => normalize_postal_code(raw_value),
            Some(ValueNormalizer::Street) => self.street_suffixes.normalize(raw_value),
            Some(ValueNormalizer::Phone) => normalize_phone(raw_value),
            None => raw_value.to_owned(),
        }
    }
}

impl Default for ShapeConfig {
    fn default() -> Self {
        let mut normalizers = BTreeMap::from([
            (keys::POSTCODE.to_owned(), ValueNormalizer::PostalCode),
            (keys::STREET.to_owned(), ValueNormalizer::Street),
        ]);
        for key in keys::PHONE {
            normalizers.insert(key.to_owned(), ValueNormalizer::Phone);
        }
        Self {
            default_tag_type: DEFAULT_TAG_TYPE.to_owned(),
            normalizers,
            street_suffixes: StreetSuffixes::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("name, alt")]
    #[case("name alt")]
    #[case("a=b")]
    #[case("x.y")]
    #[case("tab\there")]
    #[case("line\nbreak")]
    #[case("it's")]
    #[case("@home")]
    fn flags_problem_keys(#[case] key: &str) {
        assert!(has_problem_chars(key));
    }

    #[rstest]
    #[case("addr:street:name")]
    #[case("name_1")]
    #[case("building-levels")]
    #[case("")]
    fn accepts_clean_keys(#[case] key: &str) {
        assert!(!has_problem_chars(key));
    }

    #[rstest]
    #[case("addr:postcode", "10001-2062", "10001")]
    #[case("addr:street", "Canal St", "Canal Street")]
    #[case("phone", "2122391222", "+1-212-239-1222")]
    #[case("contact:phone", "(212) 333-3100", "+1-212-333-3100")]
    #[case("postcode", "10001-2062", "10001-2062")]
    #[case("name", "Canal St", "Canal St")]
    fn routes_values_by_raw_key(#[case] key: &str, #[case] raw: &str, #[case] expected: &str) {
        assert_eq!(ShapeConfig::default().normalize_value(key, raw), expected);
    }

    #[rstest]
    fn normalizers_can_be_removed() {
        let config = ShapeConfig::default().without_normalizer(keys::STREET);
        assert_eq!(config.normalize_value(keys::STREET, "Canal St"), "Canal St");
        assert_eq!(config.normalizer_for(keys::STREET), None);
    }
}
