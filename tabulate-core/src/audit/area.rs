//! Postal code to geographic area classification.

use crate::normalize::digits_only;

/// Label for postal codes no rule claims.
pub const OTHER_AREA: &str = "Other";

/// One classification rule: any listed prefix files a code under `area`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaRule {
    prefixes: &'static [&'static str],
    area: &'static str,
}

impl AreaRule {
    /// Build a rule matching codes that start with any of `prefixes`.
    #[must_use]
    pub const fn new(prefixes: &'static [&'static str], area: &'static str) -> Self {
        Self { prefixes, area }
    }

    /// Whether `digits` starts with one of the rule's prefixes.
    #[must_use]
    pub fn matches(&self, digits: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| digits.starts_with(prefix))
    }

    /// Area label of the rule.
    #[must_use]
    pub const fn area(&self) -> &'static str {
        self.area
    }
}

/// Area rules in evaluation order; the first match wins.
///
/// Specific three-digit prefixes precede the two-digit prefixes that
/// contain them: `103` (Staten Island) and `104` (Bronx) sit inside `10`,
/// and `112` (Brooklyn) inside `11` (Queens).
pub const POSTAL_AREA_RULES: [AreaRule; 6] = [
    AreaRule::new(&["100", "101", "102"], "Manhattan"),
    AreaRule::new(&["104"], "Bronx"),
    AreaRule::new(&["112"], "Brooklyn"),
    AreaRule::new(&["103"], "Staten Island"),
    AreaRule::new(&["11"], "Queens"),
    AreaRule::new(&["07"], "New Jersey"),
];

/// Classify a raw postal code by the digits it contains.
///
/// # Examples
/// ```
/// use tabulate_core::audit::classify_postal_area;
///
/// assert_eq!(classify_postal_area("NY 11201"), "Brooklyn");
/// assert_eq!(classify_postal_area("11375"), "Queens");
/// assert_eq!(classify_postal_area("unknown"), "Other");
/// ```
#[must_use]
pub fn classify_postal_area(raw: &str) -> &'static str {
    let digits = digits_only(raw);
    POSTAL_AREA_RULES
        .iter()
        .find(|rule| rule.matches(&digits))
        .map_or(OTHER_AREA, AreaRule::area)
}
