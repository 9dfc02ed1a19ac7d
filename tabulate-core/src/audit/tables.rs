//! Caller-owned accumulators filled by the auditors.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Occurrence count per format signature (for example `"NY XXXXX"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct FormatTally {
    counts: BTreeMap<String, u64>,
}

impl FormatTally {
    /// Count one occurrence of `signature`.
    pub fn record(&mut self, signature: String) {
        *self.counts.entry(signature).or_default() += 1;
    }

    /// Occurrences of `signature`; zero when never seen.
    #[must_use]
    pub fn count(&self, signature: &str) -> u64 {
        self.counts.get(signature).copied().unwrap_or_default()
    }

    /// Signatures and counts in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts
            .iter()
            .map(|(signature, count)| (signature.as_str(), *count))
    }

    /// Number of distinct signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Occurrence count per geographic area label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct AreaTally {
    counts: BTreeMap<&'static str, u64>,
}

impl AreaTally {
    /// Count one occurrence of `area`.
    pub fn record(&mut self, area: &'static str) {
        *self.counts.entry(area).or_default() += 1;
    }

    /// Occurrences of `area`; zero when never seen.
    #[must_use]
    pub fn count(&self, area: &str) -> u64 {
        self.counts.get(area).copied().unwrap_or_default()
    }

    /// Areas and counts in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.counts.iter().map(|(area, count)| (*area, *count))
    }

    /// Total number of classified values.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Distinct street names grouped by their non-canonical suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct StreetTypeGroups {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl StreetTypeGroups {
    /// File `street_name` under `suffix`; duplicates collapse.
    pub fn record(&mut self, suffix: &str, street_name: &str) {
        self.groups
            .entry(suffix.to_owned())
            .or_default()
            .insert(street_name.to_owned());
    }

    /// Street names filed under `suffix`.
    #[must_use]
    pub fn names(&self, suffix: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(suffix)
    }

    /// Suffixes and their street names in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.groups
            .iter()
            .map(|(suffix, names)| (suffix.as_str(), names))
    }

    /// Number of distinct suffixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
