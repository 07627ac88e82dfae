//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Keep rows whose `column` holds the string `label`.
///
/// Returns an empty dataset with the same schema when `column` is absent.
pub fn filter_eq_str(dataset: &DataSet, column: &str, label: &str) -> DataSet {
    match dataset.schema.index_of(column) {
        Some(idx) => filter(dataset, |row| row.get(idx).and_then(Value::as_str) == Some(label)),
        None => filter(dataset, |_| false),
    }
}

/// Keep rows whose numeric `column` equals `flag` (e.g. `is_goal == 1`).
///
/// Returns an empty dataset with the same schema when `column` is absent.
pub fn filter_flag(dataset: &DataSet, column: &str, flag: i64) -> DataSet {
    match dataset.schema.index_of(column) {
        Some(idx) => filter(dataset, |row| row.get(idx).and_then(Value::as_i64) == Some(flag)),
        None => filter(dataset, |_| false),
    }
}
