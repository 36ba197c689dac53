//! Turns raw per-language byte counts into a chart-ready dataset.

use log::debug;
use serde::Serialize;

use crate::colors::{ColorTable, OTHER_COLOR};
use crate::error::{Result, TopLangsError};
use crate::totals::RawTotals;

/// Label of the bucket that collects every language below the threshold.
pub const OTHER_LABEL: &str = "Other";

/// Parallel, render-ready sequences. Entry `i` of each vector describes the
/// same slice; "Other", when present, is always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    pub sizes: Vec<u64>,
    pub labels: Vec<String>,
    pub colors: Vec<String>,
    pub percentages: Vec<String>,
    /// Sum of every input count; the denominator of each percentage.
    pub total: u64,
}

/// One row of a [`ChartDataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetEntry<'a> {
    pub size: u64,
    pub label: &'a str,
    pub color: &'a str,
    pub percentage: &'a str,
}

impl ChartDataset {
    fn with_capacity(total: u64, capacity: usize) -> Self {
        Self {
            sizes: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            percentages: Vec::with_capacity(capacity),
            total,
        }
    }

    fn push(&mut self, label: &str, size: u64, color: &str) {
        self.percentages.push(format_percentage(label, size, self.total));
        self.sizes.push(size);
        self.labels.push(label.to_string());
        self.colors.push(color.to_string());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = DatasetEntry<'_>> {
        self.sizes
            .iter()
            .zip(&self.labels)
            .zip(&self.colors)
            .zip(&self.percentages)
            .map(|(((size, label), color), percentage)| DatasetEntry {
                size: *size,
                label,
                color,
                percentage,
            })
    }
}

/// Build the chart dataset for `totals`.
///
/// Languages whose share of the total is at least `min_pct` (a fraction,
/// `0.015` meaning 1.5%) are kept, largest first with ties ordered by name.
/// The rest are summed into a trailing "Other" entry, which is left out when
/// nothing fell below the threshold.
///
/// A language literally named "Other" always joins the bucket, even when
/// `min_pct` is `0`, so labels stay unique.
///
/// Fails with [`TopLangsError::Overflow`] when the counts do not sum within
/// a `u64`; every entry, "Other" included, is then bounded by `total`.
pub fn process(totals: &RawTotals, min_pct: f64, colors: &ColorTable) -> Result<ChartDataset> {
    if totals.is_empty() {
        return Err(TopLangsError::EmptyInput);
    }
    if min_pct.is_nan() || min_pct < 0.0 {
        return Err(TopLangsError::InvalidThreshold(min_pct));
    }

    let mut languages: Vec<(&str, u64)> = totals.iter().filter(|(_, count)| *count > 0).collect();
    if languages.is_empty() {
        return Err(TopLangsError::EmptyInput);
    }
    languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total = totals.checked_total().ok_or(TopLangsError::Overflow)?;
    let mut dataset = ChartDataset::with_capacity(total, languages.len() + 1);
    let mut other = 0u64;

    for (language, count) in languages {
        // A language literally called "Other" would clash with the bucket label.
        if language != OTHER_LABEL && share(count, total) >= min_pct {
            dataset.push(language, count, colors.resolve(language));
        } else {
            debug!("Folding {language} ({count} bytes) into {OTHER_LABEL}");
            other += count;
        }
    }

    if other > 0 {
        dataset.push(OTHER_LABEL, other, OTHER_COLOR);
    }

    Ok(dataset)
}

#[allow(clippy::cast_precision_loss)]
fn share(count: u64, total: u64) -> f64 {
    count as f64 / total as f64
}

fn format_percentage(label: &str, count: u64, total: u64) -> String {
    format!("{label} - {:.1}%", share(count, total) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, u64)]) -> RawTotals {
        pairs.iter().copied().collect()
    }

    fn example() -> RawTotals {
        totals(&[("Go", 700), ("Rust", 200), ("HTML", 80), ("CSS", 20)])
    }

    fn table() -> ColorTable {
        ColorTable::from_json_str(
            r##"{
                "Go": {"color": "#00ADD8"},
                "Rust": {"color": "#dea584"},
                "HTML": {"color": "#e34c26"},
                "CSS": {"color": "#663399"}
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn buckets_minor_languages_into_other() {
        let dataset = process(&example(), 0.1, &table()).unwrap();

        assert_eq!(dataset.sizes, vec![700, 200, 100]);
        assert_eq!(dataset.labels, vec!["Go", "Rust", "Other"]);
        assert_eq!(dataset.colors, vec!["#00ADD8", "#dea584", OTHER_COLOR]);
        assert_eq!(
            dataset.percentages,
            vec!["Go - 70.0%", "Rust - 20.0%", "Other - 10.0%"]
        );
        assert_eq!(dataset.total, 1000);
    }

    #[test]
    fn zero_threshold_keeps_every_language() {
        let dataset = process(&example(), 0.0, &table()).unwrap();

        assert_eq!(dataset.labels, vec!["Go", "Rust", "HTML", "CSS"]);
        assert_eq!(dataset.sizes, vec![700, 200, 80, 20]);
        assert!(!dataset.labels.iter().any(|l| l == OTHER_LABEL));
    }

    #[test]
    fn threshold_of_one_leaves_only_other() {
        let dataset = process(&example(), 1.0, &table()).unwrap();

        assert_eq!(dataset.labels, vec![OTHER_LABEL]);
        assert_eq!(dataset.sizes, vec![1000]);
        assert_eq!(dataset.percentages, vec!["Other - 100.0%"]);
        assert_eq!(dataset.total, 1000);
    }

    #[test]
    fn threshold_above_one_buckets_everything() {
        let dataset = process(&totals(&[("Rust", 5)]), 1.5, &table()).unwrap();
        assert_eq!(dataset.labels, vec![OTHER_LABEL]);
        assert_eq!(dataset.sizes, vec![5]);
    }

    #[test]
    fn share_equal_to_threshold_is_major() {
        let dataset = process(&example(), 0.2, &table()).unwrap();
        assert_eq!(dataset.labels, vec!["Go", "Rust", "Other"]);
    }

    #[test]
    fn empty_totals_fail() {
        assert!(matches!(
            process(&RawTotals::new(), 0.1, &table()),
            Err(TopLangsError::EmptyInput)
        ));
    }

    #[test]
    fn all_zero_totals_fail() {
        assert!(matches!(
            process(&totals(&[("Rust", 0), ("Go", 0)]), 0.1, &table()),
            Err(TopLangsError::EmptyInput)
        ));
    }

    #[test]
    fn zero_counts_never_appear() {
        let dataset = process(&totals(&[("Rust", 10), ("Go", 0)]), 0.0, &table()).unwrap();
        assert_eq!(dataset.labels, vec!["Rust"]);
    }

    #[test]
    fn negative_or_nan_threshold_fails() {
        for bad in [-0.01, f64::NAN, f64::NEG_INFINITY] {
            assert!(matches!(
                process(&example(), bad, &table()),
                Err(TopLangsError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn ties_break_by_name() {
        let input = totals(&[("Zig", 50), ("C", 50), ("Ada", 50), ("Go", 100)]);
        let dataset = process(&input, 0.0, &table()).unwrap();
        assert_eq!(dataset.labels, vec!["Go", "Ada", "C", "Zig"]);

        let again = process(&input, 0.0, &table()).unwrap();
        assert_eq!(dataset, again);
    }

    #[test]
    fn unknown_language_gets_fallback_color() {
        let dataset = process(&totals(&[("Brainfuck", 3), ("Go", 9)]), 0.0, &table()).unwrap();
        assert_eq!(dataset.colors, vec!["#00ADD8", crate::colors::FALLBACK_COLOR]);
    }

    #[test]
    fn language_named_other_merges_with_bucket() {
        let input = totals(&[("Go", 90), ("Other", 6), ("CSS", 4)]);
        let dataset = process(&input, 0.05, &table()).unwrap();
        assert_eq!(dataset.labels, vec!["Go", "Other"]);
        assert_eq!(dataset.sizes, vec![90, 10]);

        let dataset = process(&input, 0.0, &table()).unwrap();
        assert_eq!(dataset.labels, vec!["Go", "CSS", "Other"]);
        assert_eq!(dataset.sizes, vec![90, 4, 6]);
    }

    #[test]
    fn sizes_sum_to_total_and_vectors_align() {
        let input = totals(&[
            ("Go", 1234),
            ("Rust", 999),
            ("Shell", 17),
            ("C", 3),
            ("Nix", 1),
            ("HTML", 640),
        ]);
        for min_pct in [0.0, 0.001, 0.01, 0.1, 0.3, 0.5, 1.0] {
            let dataset = process(&input, min_pct, &table()).unwrap();
            assert_eq!(dataset.sizes.iter().sum::<u64>(), dataset.total);
            assert_eq!(dataset.total, input.total());
            assert_eq!(dataset.labels.len(), dataset.len());
            assert_eq!(dataset.colors.len(), dataset.len());
            assert_eq!(dataset.percentages.len(), dataset.len());
            assert_eq!(dataset.entries().count(), dataset.len());
        }
    }

    #[test]
    fn other_only_when_something_is_below_threshold() {
        let input = totals(&[("Go", 60), ("Rust", 40)]);
        let dataset = process(&input, 0.4, &table()).unwrap();
        assert_eq!(dataset.labels, vec!["Go", "Rust"]);

        let dataset = process(&input, 0.41, &table()).unwrap();
        assert_eq!(dataset.labels, vec!["Go", "Other"]);
        assert_eq!(dataset.sizes, vec![60, 40]);
    }

    #[test]
    fn totals_past_u64_are_rejected() {
        let half = 1u64 << 63;
        assert!(matches!(
            process(&totals(&[("A", half), ("B", half)]), 1.0, &table()),
            Err(TopLangsError::Overflow)
        ));
        assert!(matches!(
            process(&totals(&[("A", u64::MAX), ("B", 5)]), 0.0, &table()),
            Err(TopLangsError::Overflow)
        ));
    }

    #[test]
    fn near_max_totals_keep_sizes_summing_to_total() {
        let input = totals(&[("A", u64::MAX - 10), ("B", 6), ("C", 4)]);
        let dataset = process(&input, 0.5, &table()).unwrap();
        assert_eq!(dataset.total, u64::MAX);
        assert_eq!(dataset.labels, vec!["A", "Other"]);
        assert_eq!(dataset.sizes, vec![u64::MAX - 10, 10]);
        assert_eq!(
            dataset.sizes.iter().try_fold(0u64, |acc, s| acc.checked_add(*s)),
            Some(dataset.total)
        );
    }

    #[test]
    fn entries_follow_vector_order() {
        let dataset = process(&example(), 0.1, &table()).unwrap();
        let first = dataset.entries().next().unwrap();
        assert_eq!(
            first,
            DatasetEntry {
                size: 700,
                label: "Go",
                color: "#00ADD8",
                percentage: "Go - 70.0%",
            }
        );
    }
}
