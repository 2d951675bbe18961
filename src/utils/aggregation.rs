use std::collections::BTreeMap;

use crate::analysis::CombinedCommitActivity;
use crate::types::{Dimension, GroupBy};

/// Series name used when activity is not partitioned.
pub const FLAT_SERIES: &str = "All";

/// A series-by-category table for one dimension, ready for a bar chart.
///
/// Series are kept in lexicographic key order; every series holds one value
/// per category label of the dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackedSeries {
    dimension: Dimension,
    series: BTreeMap<String, Vec<u64>>,
}

impl StackedSeries {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            series: BTreeMap::new(),
        }
    }

    /// Add `values` element-wise into the series `key`, creating it if needed.
    fn accumulate(&mut self, key: &str, values: &[u64]) {
        let width = self.dimension.labels().len();
        let slots = self
            .series
            .entry(key.to_string())
            .or_insert_with(|| vec![0; width]);
        for (slot, value) in slots.iter_mut().zip(values) {
            *slot += *value;
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn labels(&self) -> &'static [String] {
        self.dimension.labels()
    }

    pub fn series(&self) -> &BTreeMap<String, Vec<u64>> {
        &self.series
    }

    /// Series keys in presentation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn values(&self, key: &str) -> Option<&[u64]> {
        self.series.get(key).map(Vec::as_slice)
    }

    /// The value of one series at one category label.
    pub fn value(&self, key: &str, label: &str) -> Option<u64> {
        let index = self.labels().iter().position(|l| l == label)?;
        self.series.get(key)?.get(index).copied()
    }

    /// `(label, value)` pairs of a series in category order.
    pub fn ordered_pairs(&self, key: &str) -> Option<Vec<(&'static str, u64)>> {
        let values = self.series.get(key)?;
        Some(
            self.labels()
                .iter()
                .map(String::as_str)
                .zip(values.iter().copied())
                .collect(),
        )
    }

    /// Per-category sums across all series.
    pub fn category_totals(&self) -> Vec<u64> {
        let mut totals = vec![0; self.labels().len()];
        for values in self.series.values() {
            for (total, value) in totals.iter_mut().zip(values) {
                *total += *value;
            }
        }
        totals
    }

    pub fn total(&self) -> u64 {
        self.series.values().flatten().sum()
    }

    /// The table as nested maps: series key -> category label -> value.
    pub fn to_label_map(&self) -> BTreeMap<String, BTreeMap<String, u64>> {
        self.series
            .iter()
            .map(|(key, values)| {
                let by_label = self
                    .labels()
                    .iter()
                    .cloned()
                    .zip(values.iter().copied())
                    .collect();
                (key.clone(), by_label)
            })
            .collect()
    }
}

/// Reshape per-repository, per-developer buckets into chart series.
pub fn group_activity(
    combined: &CombinedCommitActivity,
    dimension: Dimension,
    group_by: GroupBy,
) -> StackedSeries {
    let mut stacked = StackedSeries::new(dimension);
    if group_by == GroupBy::Flat {
        stacked.accumulate(FLAT_SERIES, &[]);
    }

    for repo in combined.repos() {
        for (developer, buckets) in repo.activity.iter() {
            let key = match group_by {
                GroupBy::Flat => FLAT_SERIES,
                GroupBy::ByRepository => repo.name.as_str(),
                GroupBy::ByDeveloper => developer.as_str(),
            };
            stacked.accumulate(key, dimension.values(buckets));
        }
    }
    stacked
}

/// Each series divided by its own total, so every non-empty series sums to 1.
pub fn normalize(stacked: &StackedSeries) -> BTreeMap<String, Vec<f64>> {
    stacked
        .series()
        .iter()
        .map(|(key, values)| {
            let total: u64 = values.iter().sum();
            let proportions = values
                .iter()
                .map(|value| {
                    if total > 0 {
                        *value as f64 / total as f64
                    } else {
                        0.0
                    }
                })
                .collect();
            (key.clone(), proportions)
        })
        .collect()
}
