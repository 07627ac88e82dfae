use std::path::PathBuf;

use crate::error::AnalysisError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (load failed on bad content).
    Error,
    /// Critical error (missing file, I/O failure).
    Critical,
}

impl LoadSeverity {
    /// Classify a load failure.
    pub fn of(error: &AnalysisError) -> Self {
        match error {
            AnalysisError::FileNotFound { .. } | AnalysisError::Io(_) => Self::Critical,
            AnalysisError::Csv(e) if e.is_io_error() => Self::Critical,
            _ => Self::Error,
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// File name as requested by the caller.
    pub file_name: String,
    /// Path resolved against the raw data directory.
    pub path: PathBuf,
}

/// Shape of a successfully loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of loaded rows.
    pub rows: usize,
    /// Number of loaded columns.
    pub columns: usize,
    /// Column names in file order.
    pub column_names: Vec<String>,
}

/// Observer interface for load outcomes.
///
/// Implementors can print progress, record metrics, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when loading succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: &LoadStats) {}

    /// Called when loading fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &AnalysisError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &AnalysisError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Prints the loaded table's shape to stdout.
#[derive(Debug, Default)]
pub struct StdOutObserver;

impl LoadObserver for StdOutObserver {
    fn on_success(&self, ctx: &LoadContext, stats: &LoadStats) {
        println!("Loaded '{}' successfully!", ctx.file_name);
        println!("Total rows: {}", stats.rows);
        println!("Total columns: {}", stats.columns);
        println!("Columns: {}\n", join_names(&stats.column_names, " | "));
    }
}

/// Join names with `separator`, collapsing runs of internal whitespace in each name.
pub fn join_names<S: AsRef<str>>(names: &[S], separator: &str) -> String {
    names
        .iter()
        .map(|s| s.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::{join_names, LoadSeverity};
    use crate::error::AnalysisError;
    use std::path::PathBuf;

    #[test]
    fn join_names_collapses_whitespace() {
        assert_eq!(join_names(&["id  event", "time"], " | "), "id event | time");
        assert_eq!(join_names::<&str>(&[], ", "), "");
    }

    #[test]
    fn missing_file_is_critical() {
        let err = AnalysisError::FileNotFound {
            path: PathBuf::from("data/raw/x.csv"),
        };
        assert_eq!(LoadSeverity::of(&err), LoadSeverity::Critical);
        let err = AnalysisError::SchemaMismatch {
            message: "m".to_string(),
        };
        assert_eq!(LoadSeverity::of(&err), LoadSeverity::Error);
    }
}
