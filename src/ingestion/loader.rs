//! Loading event logs from the raw data directory.
//!
//! [`load_data_csv`] resolves a file name against [`LoadOptions::raw_data_dir`], checks that the
//! file exists, and parses it into a [`DataSet`] unmodified. If a [`LoadObserver`] is configured,
//! success (with the table's shape), failure and alerts are reported to it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{DataSet, Schema};

use super::csv::{ingest_csv_from_path, ingest_csv_inferred_from_path};
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Options controlling how event logs are located and parsed.
///
/// Use [`Default`] for the standard `data/raw` layout.
#[derive(Clone)]
pub struct LoadOptions {
    /// Directory file names are resolved against.
    pub raw_data_dir: PathBuf,
    /// If `Some`, parse with this schema; otherwise infer column types from the data.
    pub schema: Option<Schema>,
    /// Optional observer for progress and failures.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("raw_data_dir", &self.raw_data_dir)
            .field("schema_set", &self.schema.is_some())
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            raw_data_dir: PathBuf::from("data").join("raw"),
            schema: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load `file_name` from the raw data directory.
///
/// Returns [`AnalysisError::FileNotFound`] before any parsing if the resolved path does not
/// exist.
///
/// ```no_run
/// use match_event_analysis::ingestion::{load_data_csv, LoadOptions};
///
/// # fn main() -> Result<(), match_event_analysis::AnalysisError> {
/// let events = load_data_csv("events.csv", &LoadOptions::default())?;
/// println!("rows={}", events.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_data_csv(file_name: &str, options: &LoadOptions) -> AnalysisResult<DataSet> {
    let ctx = LoadContext {
        file_name: file_name.to_owned(),
        path: options.raw_data_dir.join(file_name),
    };

    let result = if ctx.path.exists() {
        match &options.schema {
            Some(schema) => ingest_csv_from_path(&ctx.path, schema),
            None => ingest_csv_inferred_from_path(&ctx.path),
        }
    } else {
        Err(AnalysisError::FileNotFound {
            path: ctx.path.clone(),
        })
    };

    if let Some(observer) = &options.observer {
        match &result {
            Ok(ds) => observer.on_success(
                &ctx,
                &LoadStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                    column_names: ds.schema.field_names().map(str::to_owned).collect(),
                },
            ),
            Err(e) => {
                let severity = LoadSeverity::of(e);
                observer.on_failure(&ctx, severity, e);
                if severity >= options.alert_at_or_above {
                    observer.on_alert(&ctx, severity, e);
                }
            }
        }
    }

    result
}
