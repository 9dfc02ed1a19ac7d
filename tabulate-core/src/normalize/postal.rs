use super::{digits_only, first_listed};

/// Separator used when a single tag lists several postal codes.
const LIST_SEPARATOR: char = ';';
/// Digits in a basic ZIP code.
const ZIP_LENGTH: usize = 5;
/// Digits in a ZIP+4 code.
const ZIP_PLUS_FOUR_LENGTH: usize = 9;

/// Normalise a postal code to its five-digit form.
///
/// Only the first of several `;`-separated codes is kept and every
/// non-digit is removed. Nine digits (ZIP+4) are cut to the leading five.
/// Any other digit count is returned unvalidated, which may be empty.
///
/// # Examples
/// ```
/// use tabulate_core::normalize_postal_code;
///
/// assert_eq!(normalize_postal_code("10001-2062"), "10001");
/// assert_eq!(normalize_postal_code("NY 11106"), "11106");
/// assert_eq!(normalize_postal_code("10065;10001"), "10065");
/// ```
#[must_use]
pub fn normalize_postal_code(raw: &str) -> String {
    let first = first_listed(raw, LIST_SEPARATOR).unwrap_or(raw);
    let mut digits = digits_only(first);
    if digits.len() == ZIP_PLUS_FOUR_LENGTH {
        digits.truncate(ZIP_LENGTH);
    }
    digits
}
