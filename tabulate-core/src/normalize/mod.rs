//! Field normalisers applied to tag values while shaping.
//!
//! Each normaliser is a pure function that never fails: values it cannot
//! recognise fall back to a documented best-effort result, so malformed
//! fields degrade gracefully instead of aborting a record.

mod phone;
mod postal;
mod street;

pub use phone::normalize_phone;
pub use postal::normalize_postal_code;
pub use street::{
    DEFAULT_SUFFIX_MAPPING, EXPECTED_SUFFIXES, StreetSuffixes, SuffixMapping, normalize_street,
};

/// Placeholder substituted for every digit in a format signature.
pub(crate) const DIGIT_PLACEHOLDER: char = 'X';

/// Keep only the ASCII digits of `raw`.
pub(crate) fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Replace every digit with [`DIGIT_PLACEHOLDER`], keeping other characters.
pub(crate) fn format_signature(raw: &str) -> String {
    raw.chars()
        .map(|ch| {
            if ch.is_ascii_digit() {
                DIGIT_PLACEHOLDER
            } else {
                ch
            }
        })
        .collect()
}

/// Text before the first `separator`, when `raw` lists several values.
pub(crate) fn first_listed(raw: &str, separator: char) -> Option<&str> {
    raw.split_once(separator).map(|(first, _)| first)
}
