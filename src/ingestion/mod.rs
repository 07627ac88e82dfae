//! Loading event logs into a [`crate::types::DataSet`].
//!
//! Most callers should use [`load_data_csv`] (from [`loader`]) which:
//!
//! - resolves a file name against the raw data directory and fails fast if it is missing
//! - parses the CSV, inferring column types unless a schema is supplied
//! - optionally reports the loaded shape and failures to a [`LoadObserver`]
//!
//! Lower-level readers live in [`csv`].

pub mod csv;
pub mod loader;
pub mod observability;

pub use loader::{load_data_csv, LoadOptions};
pub use observability::{
    join_names, LoadContext, LoadObserver, LoadSeverity, LoadStats, StdOutObserver,
};
