//! Column projection, deduplication and missing-value handling.

use std::collections::HashSet;

use log::info;

use crate::ingestion::join_names;
use crate::types::{DataSet, RowKey, Value};

/// Per-column default values substituted for nulls by [`clean_data`].
///
/// Rules are applied in insertion order; a rule naming an absent column is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillRules {
    rules: Vec<(String, Value)>,
}

impl FillRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the default for `column`.
    pub fn with(mut self, column: impl Into<String>, value: Value) -> Self {
        let column = column.into();
        match self.rules.iter_mut().find(|(c, _)| *c == column) {
            Some(rule) => rule.1 = value,
            None => self.rules.push((column, value)),
        }
        self
    }

    /// Iterate `(column, default)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.rules.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Keep only the requested columns that are present in `dataset`.
///
/// Absent names are dropped silently and repeated names are kept once. Columns come out in the
/// order they are requested; row order and row count are unchanged.
pub fn filter_columns(dataset: &DataSet, columns: &[&str]) -> DataSet {
    info!(
        "Filtering columns({}): {}",
        columns.len(),
        join_names(columns, ", ")
    );

    let mut indices: Vec<usize> = Vec::with_capacity(columns.len());
    for name in columns {
        if let Some(idx) = dataset.schema.index_of(name) {
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }
    }
    dataset.select_indices(&indices)
}

/// Clean a (usually column-filtered) event table.
///
/// 1. Exact-duplicate rows are removed, keeping the first occurrence.
/// 2. Nulls in the columns named by `fill_rules` are replaced by the rule's value, cast to the
///    column's type.
/// 3. With `required_columns`, rows holding a null in any of those (present) columns are dropped.
///    Without it, rows holding a null in **any** column are dropped.
///
/// Rows in the result are contiguous and keep their relative order.
pub fn clean_data(
    dataset: &DataSet,
    fill_rules: Option<&FillRules>,
    required_columns: Option<&[&str]>,
) -> DataSet {
    let mut seen = HashSet::with_capacity(dataset.row_count());
    let deduped = DataSet::new(
        dataset.schema.clone(),
        dataset
            .rows
            .iter()
            .filter(|&row| seen.insert(RowKey(row)))
            .cloned()
            .collect(),
    );

    let filled = match fill_rules {
        Some(rules) if !rules.is_empty() => fill_nulls(&deduped, rules),
        _ => deduped,
    };

    let governing: Vec<usize> = match required_columns {
        Some(cols) => cols
            .iter()
            .filter_map(|c| filled.schema.index_of(c))
            .collect(),
        None => (0..filled.column_count()).collect(),
    };

    filled.filter_rows(|row| {
        governing
            .iter()
            .all(|&i| row.get(i).is_some_and(|v| !v.is_null()))
    })
}

fn fill_nulls(dataset: &DataSet, rules: &FillRules) -> DataSet {
    let targets: Vec<(usize, Value)> = rules
        .iter()
        .filter_map(|(col, v)| {
            let i = dataset.schema.index_of(col)?;
            let data_type = dataset.schema.fields.get(i)?.data_type;
            Some((i, v.cast_to(data_type)))
        })
        .collect();

    dataset.map_rows(|row| {
        let mut out = row.to_vec();
        for (i, default) in &targets {
            if out[*i].is_null() {
                out[*i] = default.clone();
            }
        }
        out
    })
}
