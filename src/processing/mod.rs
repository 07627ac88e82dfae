//! In-memory table transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion and
//! never mutates its input.
//!
//! - [`filter()`]: row filtering by predicate (plus label / flag shorthands)
//! - [`reduce()`]: column reductions (count/distinct/sum/min/max)
//! - [`filter_columns`] / [`clean_data`]: projection, deduplication and null handling
//! - [`decode_categorical_data`]: integer codes to `<column>_label` columns
//!
//! ## Example: clean → decode → reduce
//!
//! ```rust
//! use match_event_analysis::processing::{
//!     clean_data, decode_categorical_data, filter_columns, filter_eq_str, reduce, ReduceOp,
//! };
//! use match_event_analysis::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("id_event", DataType::Int64),
//!     Field::new("event_type", DataType::Int64),
//!     Field::new("is_goal", DataType::Int64),
//!     Field::new("text", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(1), Value::Int64(1), Value::Null],
//!         vec![Value::Int64(1), Value::Int64(1), Value::Int64(1), Value::Null],
//!         vec![Value::Int64(2), Value::Int64(3), Value::Int64(0), Value::Null],
//!     ],
//! );
//!
//! let projected = filter_columns(&ds, &["id_event", "event_type", "is_goal"]);
//! let cleaned = clean_data(&projected, None, None);
//! let decoded = decode_categorical_data(&cleaned);
//!
//! let attempts = filter_eq_str(&decoded, "event_type_label", "Attempt");
//! assert_eq!(attempts.row_count(), 1);
//! assert_eq!(reduce(&decoded, "is_goal", ReduceOp::Sum), Some(Value::Int64(1)));
//! ```

pub mod clean;
pub mod decode;
pub mod filter;
pub mod reduce;

pub use clean::{clean_data, filter_columns, FillRules};
pub use decode::{decode_categorical_data, CategoryColumn};
pub use filter::{filter, filter_eq_str, filter_flag};
pub use reduce::{reduce, ReduceOp};
