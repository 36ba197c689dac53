use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Byte counts per language, summed across repositories.
///
/// Merging is additive, so partial results collected in any order reduce to
/// the same totals.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(transparent)]
pub struct RawTotals {
    counts: BTreeMap<String, u64>,
}

impl RawTotals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, language: impl Into<String>, count: u64) {
        let entry = self.counts.entry(language.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    pub fn merge(&mut self, other: Self) {
        for (language, count) in other.counts {
            self.add(language, count);
        }
    }

    /// Like [`merge`](Self::merge), but `None` once any count or the grand
    /// total no longer fits in a `u64`.
    #[must_use]
    pub fn checked_merge(&mut self, other: Self) -> Option<()> {
        for (language, count) in other.counts {
            let entry = self.counts.entry(language).or_insert(0);
            *entry = entry.checked_add(count)?;
        }
        self.checked_total().map(|_| ())
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<u64> {
        self.counts.get(language).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(lang, count)| (lang.as_str(), *count))
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    /// Sum of all counts, or `None` if it overflows.
    #[must_use]
    pub fn checked_total(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |acc, count| acc.checked_add(*count))
    }
}

impl FromIterator<(String, u64)> for RawTotals {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut totals = Self::new();
        for (language, count) in iter {
            totals.add(language, count);
        }
        totals
    }
}

impl<'a> FromIterator<(&'a str, u64)> for RawTotals {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(lang, count)| (lang.to_string(), count))
            .collect()
    }
}

impl IntoIterator for RawTotals {
    type Item = (String, u64);
    type IntoIter = btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
