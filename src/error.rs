use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading, exporting and chart rendering.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type returned by the loader, reporter and visualizer.
///
/// Cleaning, decoding and aggregation never fail: absent columns yield empty or partial results.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Underlying I/O error (e.g. permission denied, output directory not creatable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// PNG encoding error while saving a chart.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The input file does not exist under the raw data directory.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The input does not conform to the provided schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A chart or export needs data that the table does not carry.
    #[error("missing data: {message}")]
    MissingData { message: String },
}

impl AnalysisError {
    pub(crate) fn missing_data(message: impl Into<String>) -> Self {
        Self::MissingData {
            message: message.into(),
        }
    }
}
