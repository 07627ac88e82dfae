//! `match-event-analysis` loads football match event logs (one CSV row per event) into an
//! in-memory [`types::DataSet`], cleans and decodes them, and summarises them per team, player,
//! pitch location, time bucket and discipline.
//!
//! The stages are plain functions over owned tables; each returns a new table or a typed summary:
//!
//! 1. [`ingestion::load_data_csv`]: read `data/raw/<file>` with inferred column types
//! 2. [`processing::filter_columns`] / [`processing::clean_data`]: project, dedup, fill, drop
//! 3. [`processing::decode_categorical_data`]: add `<column>_label` text columns
//! 4. [`analysis`]: overview, team / player rollups, location, discipline and time breakdowns
//! 5. [`report`] and [`visualize`]: text report, CSV exports and PNG charts
//!
//! [`pipeline::run_pipeline`] chains all of them the way the `match_report` binary does.
//!
//! ## Quick example
//!
//! ```rust
//! use match_event_analysis::analysis::team_performance_analysis;
//! use match_event_analysis::processing::{clean_data, decode_categorical_data};
//! use match_event_analysis::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("event_team", DataType::Utf8),
//!     Field::new("event_type", DataType::Int64),
//!     Field::new("shot_outcome", DataType::Int64),
//!     Field::new("is_goal", DataType::Int64),
//! ]);
//! let lyon = || Value::Utf8("Lyon".to_string());
//! let raw = DataSet::new(
//!     schema,
//!     vec![
//!         vec![lyon(), Value::Int64(1), Value::Int64(1), Value::Int64(1)],
//!         vec![lyon(), Value::Int64(1), Value::Int64(2), Value::Int64(0)],
//!         vec![lyon(), Value::Int64(3), Value::Null, Value::Int64(0)],
//!     ],
//! );
//!
//! // only team and type are required; shot fields stay blank on the foul
//! let cleaned = clean_data(&raw, None, Some(&["event_team", "event_type"]));
//! let teams = team_performance_analysis(&decode_categorical_data(&cleaned));
//! assert_eq!(teams[0].total_shots, 2);
//! assert_eq!(teams[0].shooting_accuracy, 50.0);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`ingestion`]: CSV loading and load observers
//! - [`processing`]: cleaning, decoding and row primitives (filter/reduce)
//! - [`analysis`]: pure aggregations over a decoded table
//! - [`report`]: text report and file exports
//! - [`visualize`]: PNG charts
//! - [`pipeline`]: the end-to-end run
//! - [`error`]: the crate error type

pub mod analysis;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod report;
pub mod types;
pub mod visualize;

pub use error::{AnalysisError, AnalysisResult};
