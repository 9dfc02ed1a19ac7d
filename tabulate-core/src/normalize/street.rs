use std::collections::{BTreeMap, BTreeSet};

/// Lookup from a non-canonical street suffix to its canonical spelling.
pub type SuffixMapping = BTreeMap<String, String>;

/// Separator between the tokens of a street name.
const TOKEN_SEPARATOR: char = ' ';

/// Canonical street suffixes that are never rewritten or flagged.
pub const EXPECTED_SUFFIXES: [&str; 27] = [
    "Street",
    "Avenue",
    "Boulevard",
    "Drive",
    "Court",
    "Place",
    "Square",
    "Lane",
    "Road",
    "Trail",
    "Parkway",
    "Commons",
    "Broadway",
    "Highway",
    "Crescent",
    "Park",
    "Plaza",
    "Terrace",
    "Way",
    "Walk",
    "East",
    "South",
    "West",
    "North",
    "Alley",
    "Circle",
    "Center",
];

/// Suffix corrections found while auditing the Manhattan extract.
///
/// Keys are matched exactly: `"St"` and `"St."` are distinct entries. The
/// `"Americas\n"` entry catches a stray line break after "Avenue of the
/// Americas"; tokens are split on spaces only, so the newline survives.
pub const DEFAULT_SUFFIX_MAPPING: [(&str, &str); 21] = [
    ("Americas\n", "Americas"),
    ("ave", "Avenue"),
    ("avenue", "Avenue"),
    ("Ave", "Avenue"),
    ("Ave.", "Avenue"),
    ("Avene", "Avenue"),
    ("Aveneu", "Avenue"),
    ("Blv", "Boulevard"),
    ("Blvd", "Boulevard"),
    ("Broadway.", "Broadway"),
    ("Ctr", "Center"),
    ("Plz", "Plaza"),
    ("Rd.", "Road"),
    ("S", "South"),
    ("st", "Street"),
    ("St", "Street"),
    ("St.", "Street"),
    ("Steet", "Street"),
    ("street", "Street"),
    ("Streeet", "Street"),
    ("ST", "Street"),
];

/// Replace the trailing suffix of `raw` using `mapping`.
///
/// The candidate suffix is the last space-delimited token. When it is a key
/// of `mapping`, that trailing token is replaced in place; identical text
/// earlier in the name is left alone. Names whose suffix is unknown are
/// returned unchanged.
///
/// # Examples
/// ```
/// use tabulate_core::{StreetSuffixes, normalize_street};
///
/// let suffixes = StreetSuffixes::default();
/// let mapping = suffixes.mapping();
/// assert_eq!(normalize_street("123 Main St.", mapping), "123 Main Street");
/// assert_eq!(normalize_street("St Marks Pl St", mapping), "St Marks Pl Street");
/// assert_eq!(normalize_street("Fifth Avenue", mapping), "Fifth Avenue");
/// ```
#[must_use]
pub fn normalize_street(raw: &str, mapping: &SuffixMapping) -> String {
    let (head, suffix) = match raw.rsplit_once(TOKEN_SEPARATOR) {
        Some((head, suffix)) => (Some(head), suffix),
        None => (None, raw),
    };
    let Some(canonical) = mapping.get(suffix) else {
        return raw.to_owned();
    };
    match head {
        Some(head) => format!("{head}{TOKEN_SEPARATOR}{canonical}"),
        None => canonical.clone(),
    }
}

/// Immutable street suffix configuration: the canonical set and the
/// correction mapping.
///
/// # Examples
/// ```
/// use tabulate_core::StreetSuffixes;
///
/// let suffixes = StreetSuffixes::default().with_mapping("Pkwy", "Parkway");
/// assert_eq!(suffixes.normalize("Henry Hudson Pkwy"), "Henry Hudson Parkway");
/// assert!(suffixes.is_expected("Parkway"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetSuffixes {
    expected: BTreeSet<String>,
    mapping: SuffixMapping,
}

impl StreetSuffixes {
    /// Build a configuration from explicit tables.
    #[must_use]
    pub const fn new(expected: BTreeSet<String>, mapping: SuffixMapping) -> Self {
        Self { expected, mapping }
    }

    /// Add a canonical suffix.
    #[must_use]
    pub fn with_expected(mut self, suffix: impl Into<String>) -> Self {
        self.expected.insert(suffix.into());
        self
    }

    /// Add or replace a suffix correction.
    #[must_use]
    pub fn with_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.mapping.insert(from.into(), to.into());
        self
    }

    /// Whether `suffix` is canonical.
    #[must_use]
    pub fn is_expected(&self, suffix: &str) -> bool {
        self.expected.contains(suffix)
    }

    /// The canonical suffix set.
    #[must_use]
    pub const fn expected(&self) -> &BTreeSet<String> {
        &self.expected
    }

    /// The correction mapping.
    #[must_use]
    pub const fn mapping(&self) -> &SuffixMapping {
        &self.mapping
    }

    /// Normalise a street name, leaving canonical suffixes untouched.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let suffix = raw
            .rsplit_once(TOKEN_SEPARATOR)
            .map_or(raw, |(_, suffix)| suffix);
        if self.is_expected(suffix) {
            return raw.to_owned();
        }
        normalize_street(raw, &self.mapping)
    }
}

impl Default for StreetSuffixes {
    fn default() -> Self {
        Self::new(
            EXPECTED_SUFFIXES.iter().map(|&suffix| suffix.to_owned()).collect(),
            DEFAULT_SUFFIX_MAPPING
                .iter()
                .map(|&(from, to)| (from.to_owned(), to.to_owned()))
                .collect(),
        )
    }
}
