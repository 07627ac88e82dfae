//! End-to-end run: load, project, clean, decode, report, then write outputs.
//!
//! Load failures are returned as `Err`. Failures while writing outputs are not: they are logged
//! once and carried in [`PipelineOutcome::outputs`] so the caller can still show the in-memory
//! report.

use std::path::PathBuf;

use chrono::Local;
use log::{error, info};

use crate::error::AnalysisResult;
use crate::ingestion::{load_data_csv, LoadOptions};
use crate::processing::{clean_data, decode_categorical_data, filter_columns, FillRules};
use crate::report::{
    generate_summary_report, save_data_exports, write_report_text, ExportOptions, ExportedFiles,
};
use crate::types::{DataSet, Value};
use crate::visualize::{create_dashboard, ChartOptions};

/// Event-log columns kept before cleaning.
pub const EVENT_COLUMNS: [&str; 16] = [
    "id_odsp",
    "id_event",
    "time",
    "event_type",
    "side",
    "event_team",
    "opponent",
    "player",
    "shot_place",
    "shot_outcome",
    "is_goal",
    "location",
    "bodypart",
    "assist_method",
    "situation",
    "fast_break",
];

/// Shot-only columns; blank on non-shot events and filled with `0` before cleaning.
pub const OPTIONAL_SHOT_COLUMNS: [&str; 7] = [
    "shot_place",
    "shot_outcome",
    "location",
    "bodypart",
    "assist_method",
    "situation",
    "fast_break",
];

/// Columns every kept event must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["id_event", "time", "event_type", "event_team"];

/// Everything a pipeline run needs. [`Default`] reproduces the standard layout
/// (`data/raw/events.csv` in, `output/summaries` and `output/plots` out).
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// File name under [`LoadOptions::raw_data_dir`].
    pub input_file: String,
    pub columns: Vec<String>,
    pub fill_rules: FillRules,
    /// `None` drops rows with a null in any column.
    pub required_columns: Option<Vec<String>>,
    pub load: LoadOptions,
    pub export: ExportOptions,
    pub charts: ChartOptions,
    pub render_charts: bool,
    /// Characters of the report shown by the console preview.
    pub preview_chars: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        let fill_rules = OPTIONAL_SHOT_COLUMNS
            .iter()
            .fold(FillRules::new(), |rules, c| rules.with(*c, Value::Int64(0)));
        Self {
            input_file: "events.csv".to_string(),
            columns: EVENT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            fill_rules,
            required_columns: Some(REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()),
            load: LoadOptions::default(),
            export: ExportOptions::default(),
            charts: ChartOptions::default(),
            render_charts: true,
            preview_chars: 1000,
        }
    }
}

/// Files written by [`export_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub report: PathBuf,
    pub data: ExportedFiles,
    /// Dashboard charts saved before the first chart failure (empty when charts are off).
    pub charts: Vec<PathBuf>,
}

/// Result of [`run_pipeline`].
#[derive(Debug)]
pub struct PipelineOutcome {
    /// `(rows, columns)` of the table as loaded.
    pub raw_shape: (usize, usize),
    /// Cleaned and decoded table.
    pub events: DataSet,
    pub report: String,
    /// `Err` when writing the report, exports or charts failed.
    pub outputs: AnalysisResult<OutputFiles>,
}

impl PipelineOutcome {
    /// First `max_chars` characters of the report.
    pub fn report_preview(&self, max_chars: usize) -> &str {
        match self.report.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.report[..idx],
            None => &self.report,
        }
    }
}

/// Run the pipeline. Only loading can fail the run.
pub fn run_pipeline(options: &PipelineOptions) -> AnalysisResult<PipelineOutcome> {
    info!("loading {}", options.input_file);
    let raw = load_data_csv(&options.input_file, &options.load)?;
    let raw_shape = (raw.row_count(), raw.column_count());

    let columns: Vec<&str> = options.columns.iter().map(String::as_str).collect();
    let projected = filter_columns(&raw, &columns);

    let required: Option<Vec<&str>> = options
        .required_columns
        .as_ref()
        .map(|cols| cols.iter().map(String::as_str).collect());
    let fill = (!options.fill_rules.is_empty()).then_some(&options.fill_rules);
    let cleaned = clean_data(&projected, fill, required.as_deref());
    info!(
        "cleaned {} -> {} rows, {} columns",
        raw_shape.0,
        cleaned.row_count(),
        cleaned.column_count()
    );

    let events = decode_categorical_data(&cleaned);
    let report = generate_summary_report(&events, Local::now().naive_local());

    let outputs = export_outputs(&events, &report, options);
    if let Err(e) = &outputs {
        error!("error writing outputs: {e}");
    }

    Ok(PipelineOutcome {
        raw_shape,
        events,
        report,
        outputs,
    })
}

/// Write the report text, the CSV exports and (if enabled) the dashboard charts.
pub fn export_outputs(
    events: &DataSet,
    report: &str,
    options: &PipelineOptions,
) -> AnalysisResult<OutputFiles> {
    let report = write_report_text(report, &options.export, None)?;
    let data = save_data_exports(events, &options.export)?;
    let charts = if options.render_charts {
        create_dashboard(events, &options.charts)
    } else {
        Vec::new()
    };
    Ok(OutputFiles {
        report,
        data,
        charts,
    })
}
