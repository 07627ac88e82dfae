//! Core data model types.
//!
//! Event logs are loaded into an in-memory [`DataSet`]: a [`Schema`] (a list of typed [`Field`]s)
//! plus row-major [`Value`] storage. Every stage of the pipeline returns a new `DataSet`.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns `true` if a field named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// `true` for [`Value::Null`] and for float `NaN`.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value. Booleans count as `0`/`1`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) if !v.is_nan() => Some(*v),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Integer view of the value; floats only convert when they are integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::Float64(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Convert to `data_type` where the value has a lossless reading as that type; anything else
    /// (including nulls) is returned unchanged.
    pub fn cast_to(&self, data_type: DataType) -> Value {
        let cast = match data_type {
            DataType::Int64 => self.as_i64().map(Value::Int64),
            DataType::Float64 => self.as_f64().map(Value::Float64),
            DataType::Bool => match self.as_i64() {
                Some(0) => Some(Value::Bool(false)),
                Some(1) => Some(Value::Bool(true)),
                _ => None,
            },
            DataType::Utf8 if !self.is_null() => Some(Value::Utf8(self.to_string())),
            DataType::Utf8 => None,
        };
        cast.unwrap_or_else(|| self.clone())
    }

    /// String view of the value (only for [`Value::Utf8`]).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Nulls render as an empty string, which is also how they are written to CSV.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) if v.is_nan() => Ok(()),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

/// Hashable view of a row, used for exact-duplicate detection.
///
/// Floats compare by bit pattern after folding `-0.0` into `0.0` and every `NaN` into `Null`.
#[derive(Debug, Clone, Copy)]
pub struct RowKey<'a>(pub &'a [Value]);

impl PartialEq for RowKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0)
                .all(|(a, b)| canonical(a) == canonical(b))
    }
}

impl Eq for RowKey<'_> {}

impl Hash for RowKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for v in self.0 {
            canonical(v).hash(state);
        }
    }
}

#[derive(PartialEq, Eq, Hash)]
enum Canonical<'a> {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(&'a str),
}

fn canonical(v: &Value) -> Canonical<'_> {
    match v {
        Value::Null => Canonical::Null,
        Value::Int64(i) => Canonical::Int(*i),
        Value::Float64(f) if f.is_nan() => Canonical::Null,
        Value::Float64(f) if *f == 0.0 => Canonical::Float(0f64.to_bits()),
        Value::Float64(f) => Canonical::Float(f.to_bits()),
        Value::Bool(b) => Canonical::Bool(*b),
        Value::Utf8(s) => Canonical::Str(s),
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Iterate the values of column `name`, or `None` if the column is absent.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| row.get(idx).unwrap_or(&Value::Null)))
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to every row.
    ///
    /// The returned dataset preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Project the dataset onto the columns at `indices`, in that order.
    pub fn select_indices(&self, indices: &[usize]) -> Self {
        let fields = indices
            .iter()
            .filter_map(|&i| self.schema.fields.get(i).cloned())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self::new(Schema::new(fields), rows)
    }

    /// Return a copy with each `(field, values)` column set, building the new rows in one pass.
    ///
    /// A column whose name already exists is replaced in place; otherwise it is appended, in the
    /// order given.
    ///
    /// # Panics
    ///
    /// Panics if any `values.len()` differs from the row count.
    pub fn with_columns(&self, columns: Vec<(Field, Vec<Value>)>) -> Self {
        let mut schema = self.schema.clone();
        let mut slots = Vec::with_capacity(columns.len());
        let mut sources = Vec::with_capacity(columns.len());
        for (field, values) in columns {
            assert!(
                values.len() == self.rows.len(),
                "column '{}' has {} values but dataset has {} rows",
                field.name,
                values.len(),
                self.rows.len()
            );
            let slot = match schema.index_of(&field.name) {
                Some(idx) => {
                    schema.fields[idx] = field;
                    idx
                }
                None => {
                    schema.fields.push(field);
                    schema.fields.len() - 1
                }
            };
            slots.push(slot);
            sources.push(values.into_iter());
        }

        let width = schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = Vec::with_capacity(width);
                out.extend_from_slice(row);
                out.resize(width, Value::Null);
                for (&slot, source) in slots.iter().zip(sources.iter_mut()) {
                    out[slot] = source.next().unwrap_or(Value::Null);
                }
                out
            })
            .collect();
        Self::new(schema, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, DataType, Field, RowKey, Schema, Value};
    use std::collections::HashSet;

    fn sample() -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("id", DataType::Int64),
                Field::new("team", DataType::Utf8),
            ]),
            vec![
                vec![Value::Int64(1), Value::Utf8("Arsenal".to_string())],
                vec![Value::Int64(2), Value::Null],
            ],
        )
    }

    #[test]
    fn as_i64_accepts_integral_floats_only() {
        assert_eq!(Value::Float64(3.0).as_i64(), Some(3));
        assert_eq!(Value::Float64(3.5).as_i64(), None);
        assert_eq!(Value::Float64(f64::NAN).as_i64(), None);
        assert_eq!(Value::Utf8("3".to_string()).as_i64(), None);
    }

    #[test]
    fn nan_counts_as_null() {
        assert!(Value::Float64(f64::NAN).is_null());
        assert!(Value::Null.is_null());
        assert!(!Value::Int64(0).is_null());
    }

    #[test]
    fn with_columns_appends_then_replaces() {
        let ds = sample();
        let added = ds.with_columns(vec![
            (
                Field::new("label", DataType::Utf8),
                vec![Value::Utf8("a".to_string()), Value::Null],
            ),
            (Field::new("n", DataType::Int64), vec![Value::Int64(1), Value::Int64(2)]),
        ]);
        assert_eq!(added.column_count(), 4);
        assert_eq!(added.rows[0][2], Value::Utf8("a".to_string()));
        assert_eq!(added.rows[1][3], Value::Int64(2));

        let replaced = added.with_columns(vec![(
            Field::new("label", DataType::Utf8),
            vec![Value::Null, Value::Utf8("b".to_string())],
        )]);
        assert_eq!(replaced.column_count(), 4);
        assert_eq!(replaced.rows[1][2], Value::Utf8("b".to_string()));
        // Original unchanged
        assert_eq!(ds.column_count(), 2);
    }

    #[test]
    #[should_panic(expected = "has 1 values")]
    fn with_columns_panics_on_length_mismatch() {
        let _ = sample().with_columns(vec![(
            Field::new("x", DataType::Int64),
            vec![Value::Int64(1)],
        )]);
    }

    #[test]
    fn cast_to_follows_the_target_type() {
        assert_eq!(Value::Int64(0).cast_to(DataType::Float64), Value::Float64(0.0));
        assert_eq!(Value::Float64(3.0).cast_to(DataType::Int64), Value::Int64(3));
        assert_eq!(Value::Float64(2.5).cast_to(DataType::Int64), Value::Float64(2.5));
        assert_eq!(Value::Int64(1).cast_to(DataType::Bool), Value::Bool(true));
        assert_eq!(Value::Int64(7).cast_to(DataType::Utf8), Value::Utf8("7".to_string()));
        assert_eq!(Value::Null.cast_to(DataType::Utf8), Value::Null);
    }

    #[test]
    fn select_indices_reorders_columns() {
        let out = sample().select_indices(&[1, 0]);
        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["team", "id"]);
        assert_eq!(out.rows[0], vec![Value::Utf8("Arsenal".to_string()), Value::Int64(1)]);
    }

    #[test]
    fn row_key_treats_nan_as_null_and_signed_zero_as_equal() {
        let a = vec![Value::Float64(f64::NAN), Value::Float64(-0.0)];
        let b = vec![Value::Null, Value::Float64(0.0)];
        let mut seen = HashSet::new();
        assert!(seen.insert(RowKey(&a)));
        assert!(!seen.insert(RowKey(&b)));
    }

    #[test]
    fn display_renders_null_as_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float64(1.5).to_string(), "1.5");
        assert_eq!(Value::Utf8("x".to_string()).to_string(), "x");
    }
}
