//! Text report and file exports.
//!
//! - [`generate_summary_report`]: pure formatting of the aggregations into a fixed layout
//! - [`save_report_to_file`] / [`save_data_exports`]: timestamped files under
//!   [`ExportOptions::summaries_dir`]

pub mod export;
pub mod summary;

pub use export::{
    save_data_exports, save_report_to_file, write_dataset_csv, write_report_text, ExportOptions,
    ExportedFiles,
};
pub use summary::generate_summary_report;

use chrono::Local;

/// Local-time suffix used in output file names (`YYYYmmdd_HHMMSS`).
pub fn file_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}
