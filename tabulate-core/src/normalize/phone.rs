use super::{digits_only, first_listed};

/// Separators between several numbers in one tag, tried in order.
const LIST_SEPARATORS: [char; 2] = [';', '/'];
/// Country code assumed for ten-digit local numbers.
const DEFAULT_COUNTRY_CODE: &str = "1";
/// Digits in a local number (area code, exchange, line).
const LOCAL_LENGTH: usize = 10;
/// Digits in a number that includes a one-digit country code.
const INTERNATIONAL_LENGTH: usize = 11;
/// Longest digit run accepted, with up to two extraneous leading digits.
const MAX_PADDED_LENGTH: usize = 13;
const AREA_CODE_LENGTH: usize = 3;
const EXCHANGE_LENGTH: usize = 3;

/// Normalise a phone number to `+C-NNN-NNN-NNNN`.
///
/// Only the first of several numbers separated by `;` (or, failing that,
/// `/`) is kept. The decision is made on the digit count alone:
///
/// - 10 digits are local and gain the country code `1`;
/// - 11 digits lead with a one-digit country code;
/// - 12 or 13 digits carry one or two extraneous leading digits (such as an
///   international `0` or `00` prefix), which are dropped.
///
/// Any other count returns `raw` unchanged.
///
/// # Examples
/// ```
/// use tabulate_core::normalize_phone;
///
/// assert_eq!(normalize_phone("(212) 333-3100"), "+1-212-333-3100");
/// assert_eq!(normalize_phone("+1 212 228-7732"), "+1-212-228-7732");
/// assert_eq!(normalize_phone("911"), "911");
/// ```
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let first = LIST_SEPARATORS
        .iter()
        .find_map(|separator| first_listed(raw, *separator))
        .unwrap_or(raw);
    let digits = digits_only(first);
    let formatted = match digits.len() {
        LOCAL_LENGTH => format_national(DEFAULT_COUNTRY_CODE, &digits),
        INTERNATIONAL_LENGTH..=MAX_PADDED_LENGTH => digits
            .get(digits.len() - INTERNATIONAL_LENGTH..)
            .and_then(format_international),
        _ => None,
    };
    formatted.unwrap_or_else(|| raw.to_owned())
}

/// Format eleven digits whose first digit is the country code.
fn format_international(digits: &str) -> Option<String> {
    let (country_code, national) = digits.split_at_checked(1)?;
    format_national(country_code, national)
}

/// Format ten national digits behind `country_code`.
fn format_national(country_code: &str, national: &str) -> Option<String> {
    let (area_code, subscriber) = national.split_at_checked(AREA_CODE_LENGTH)?;
    let (exchange, line) = subscriber.split_at_checked(EXCHANGE_LENGTH)?;
    Some(format!("+{country_code}-{area_code}-{exchange}-{line}"))
}
