//! Reduction operations for [`crate::types::DataSet`].

use std::collections::HashSet;

use crate::types::{DataSet, DataType, RowKey, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count distinct non-null values.
    CountDistinct,
    /// Sum numeric values, ignoring nulls.
    Sum,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - `Sum` returns `Some(Value::Null)` if there are no non-null values. `Int64` and `Bool`
///   columns sum to `Int64`; `Float64` columns sum to `Float64`.
/// - `CountDistinct` always returns `Some(Value::Int64(_))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    let values = || dataset.rows.iter().filter_map(move |row| row.get(idx));

    match op {
        ReduceOp::CountDistinct => {
            let distinct: HashSet<RowKey<'_>> = values()
                .filter(|v| !v.is_null())
                .map(std::slice::from_ref)
                .map(RowKey)
                .collect();
            Some(Value::Int64(distinct.len() as i64))
        }
        ReduceOp::Sum => {
            let data_type = dataset.schema.fields.get(idx)?.data_type;
            Some(sum_typed(values(), data_type))
        }
    }
}

fn sum_typed<'a>(values: impl Iterator<Item = &'a Value>, data_type: DataType) -> Value {
    match data_type {
        DataType::Int64 | DataType::Bool => values
            .filter_map(Value::as_i64)
            .reduce(|a, v| a + v)
            .map(Value::Int64)
            .unwrap_or(Value::Null),
        DataType::Float64 => values
            .filter_map(Value::as_f64)
            .reduce(|a, v| a + v)
            .map(Value::Float64)
            .unwrap_or(Value::Null),
        DataType::Utf8 => Value::Null,
    }
}
