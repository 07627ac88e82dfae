//! Result tables shared by the aggregations: frequency tables, cross tabulations, grouping and
//! the zero-filling left join.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::types::{DataSet, Value};

/// Ordered `label -> count` frequency table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    entries: Vec<(String, usize)>,
}

impl Counts {
    /// Build from entries, keeping their order.
    pub fn from_entries(entries: Vec<(String, usize)>) -> Self {
        Self { entries }
    }

    /// Count non-null values, most frequent first. Ties keep first-seen order.
    pub fn value_counts<'a>(values: impl Iterator<Item = &'a Value>) -> Self {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();
        for v in values.filter(|v| !v.is_null()) {
            let key = v.to_string();
            match positions.get(&key) {
                Some(&pos) => entries[pos].1 += 1,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, 1));
                }
            }
        }
        Self { entries }.sorted_desc()
    }

    /// Value counts of `column`, or `None` if the column is absent.
    pub fn of_column(dataset: &DataSet, column: &str) -> Option<Self> {
        dataset.column(column).map(Self::value_counts)
    }

    /// Stable sort by count, largest first.
    pub fn sorted_desc(mut self) -> Self {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self
    }

    /// Stable sort by count, smallest first.
    pub fn sorted_asc(mut self) -> Self {
        self.entries.sort_by(|a, b| a.1.cmp(&b.1));
        self
    }

    /// Count for `label` (0 if absent).
    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == label)
            .map_or(0, |(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// The first `n` entries in the current order.
    pub fn top(&self, n: usize) -> impl Iterator<Item = (&str, usize)> {
        self.iter().take(n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl<K: Into<String>> FromIterator<(K, usize)> for Counts {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().map(|(k, n)| (k.into(), n)).collect())
    }
}

/// Zero-filled contingency table of `row key x column key` counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    row_keys: Vec<String>,
    col_keys: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Tabulate `(row, column)` pairs. Row and column keys are sorted.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let pairs: Vec<(String, String)> = pairs.into_iter().collect();
        let rows: BTreeSet<&String> = pairs.iter().map(|(r, _)| r).collect();
        let row_keys = rows.into_iter().cloned().collect();
        Self::with_row_order(row_keys, pairs)
    }

    /// Tabulate `(row, column)` pairs against a fixed row order; every listed row appears even
    /// with zero counts, and pairs whose row is not listed are ignored. Column keys are sorted.
    pub fn with_row_order(
        row_keys: Vec<String>,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let pairs: Vec<(String, String)> = pairs.into_iter().collect();
        let row_pos: HashMap<&str, usize> = row_keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i))
            .collect();
        let cols: BTreeSet<&String> = pairs
            .iter()
            .filter(|(r, _)| row_pos.contains_key(r.as_str()))
            .map(|(_, c)| c)
            .collect();
        let col_keys: Vec<String> = cols.into_iter().cloned().collect();
        let col_pos: HashMap<&str, usize> = col_keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i))
            .collect();

        let mut counts = vec![vec![0usize; col_keys.len()]; row_keys.len()];
        for (r, c) in &pairs {
            if let (Some(&ri), Some(&ci)) = (row_pos.get(r.as_str()), col_pos.get(c.as_str())) {
                counts[ri][ci] += 1;
            }
        }

        Self {
            row_keys,
            col_keys,
            counts,
        }
    }

    pub fn row_keys(&self) -> &[String] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[String] {
        &self.col_keys
    }

    /// Count at `(row, col)`, 0 for unknown keys.
    pub fn get(&self, row: &str, col: &str) -> usize {
        let ri = self.row_keys.iter().position(|k| k == row);
        let ci = self.col_keys.iter().position(|k| k == col);
        match (ri, ci) {
            (Some(ri), Some(ci)) => self.counts[ri][ci],
            _ => 0,
        }
    }

    /// Counts of row `index` in column-key order.
    pub fn row_counts(&self, index: usize) -> &[usize] {
        self.counts.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty() || self.col_keys.is_empty()
    }
}

/// Group rows by `key`, skipping rows whose key is `None`. Groups come out in key order.
pub fn group_rows<'a, K, F>(dataset: &'a DataSet, mut key: F) -> BTreeMap<K, Vec<&'a [Value]>>
where
    K: Ord,
    F: FnMut(&'a [Value]) -> Option<K>,
{
    let mut groups: BTreeMap<K, Vec<&'a [Value]>> = BTreeMap::new();
    for row in &dataset.rows {
        if let Some(k) = key(row.as_slice()) {
            groups.entry(k).or_default().push(row.as_slice());
        }
    }
    groups
}

/// Left join `metrics` onto `base` by key.
///
/// Every base entry is kept in base order. Keys missing from `metrics` get `M::default()`, which
/// makes "not measured" an explicit zero rather than an absent value.
pub fn left_join_or_default<K, B, M>(
    base: BTreeMap<K, B>,
    metrics: &BTreeMap<K, M>,
) -> Vec<(K, B, M)>
where
    K: Ord,
    M: Default + Clone,
{
    base.into_iter()
        .map(|(k, b)| {
            let m = metrics.get(&k).cloned().unwrap_or_default();
            (k, b, m)
        })
        .collect()
}

/// Round to two decimals.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `part / whole * 100` rounded to two decimals; `0.0` when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 / whole as f64 * 100.0)
    }
}
