//! Property-based tests for the field normalisers and tag shaping.
//!
//! # Invariants tested
//!
//! - **Idempotence:** normalising a normalised value changes nothing.
//! - **Postal output:** normalised postal codes are digit strings.
//! - **Phone output:** a rewritten number always has the `+C-NNN-NNN-NNNN` shape.
//! - **Tag keys:** shaped keys never contain a problem character and always
//!   rebuild the raw key they came from.

use once_cell::sync::Lazy;
use proptest::prelude::*;
use regex::Regex;
use tabulate_core::shape::has_problem_chars;
use tabulate_core::{
    Attributes, Element, ElementKind, ShapeConfig, StreetSuffixes, normalize_phone,
    normalize_postal_code, shape_element,
};

#[expect(clippy::expect_used, reason = "pattern is a literal")]
static PHONE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\d-\d{3}-\d{3}-\d{4}$").expect("valid phone pattern"));

fn node_with_tags(tags: &[(String, String)]) -> Element {
    let mut element = Element::new(
        ElementKind::Node,
        Attributes::from_iter([
            ("id", "1"),
            ("lat", "40.7"),
            ("lon", "-74.0"),
            ("user", "mapper"),
            ("uid", "1"),
            ("version", "1"),
            ("changeset", "1"),
            ("timestamp", "2016-01-01T00:00:00Z"),
        ]),
    );
    element.tags = tags
        .iter()
        .map(|(key, value)| Attributes::from_iter([("k", key.as_str()), ("v", value.as_str())]))
        .collect();
    element
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn postal_codes_normalise_to_digits(raw in "[0-9A-Z ;-]{0,24}") {
        let normalised = normalize_postal_code(&raw);
        prop_assert!(normalised.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(normalize_postal_code(&normalised), normalised);
    }

    #[test]
    fn phone_numbers_are_rewritten_or_kept(raw in "[0-9()+ ./;-]{0,28}") {
        let normalised = normalize_phone(&raw);
        prop_assert!(
            normalised == raw || PHONE_SHAPE.is_match(&normalised),
            "unexpected output {:?} for {:?}",
            normalised,
            raw
        );
        prop_assert_eq!(normalize_phone(&normalised), normalised);
    }

    #[test]
    fn street_names_settle_after_one_pass(raw in "[A-Za-z0-9 .]{0,32}") {
        let suffixes = StreetSuffixes::default();
        let normalised = suffixes.normalize(&raw);
        prop_assert_eq!(suffixes.normalize(&normalised), normalised);
    }

    #[test]
    fn shaped_keys_rebuild_clean_raw_keys(
        tags in prop::collection::vec(("[a-f:, ]{1,12}", "[a-z0-9 ]{0,8}"), 0..8)
    ) {
        let config = ShapeConfig::default();
        let element = node_with_tags(&tags);
        let shaped = shape_element(&element, &config)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let kept: Vec<&String> = tags
            .iter()
            .map(|(key, _)| key)
            .filter(|key| !has_problem_chars(key))
            .collect();
        let rebuilt: Vec<String> = shaped
            .tags()
            .iter()
            .map(|row| row.original_key(config.default_tag_type()))
            .collect();
        prop_assert_eq!(rebuilt.len(), kept.len());
        for (raw, rebuilt) in kept.iter().zip(&rebuilt) {
            prop_assert_eq!(*raw, rebuilt);
        }
    }
}
