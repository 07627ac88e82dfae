//! Writing the report and CSV exports to the summaries directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;
use serde::Serialize;

use crate::analysis::{player_performance_analysis, team_performance_analysis};
use crate::error::AnalysisResult;
use crate::types::DataSet;

use super::file_timestamp;
use super::summary::generate_summary_report;

/// Where report and export files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Created on demand.
    pub summaries_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            summaries_dir: PathBuf::from("output").join("summaries"),
        }
    }
}

/// Paths written by [`save_data_exports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub processed_data: PathBuf,
    /// `None` when the team table was empty.
    pub team_analysis: Option<PathBuf>,
    /// `None` when the player table was empty.
    pub player_analysis: Option<PathBuf>,
}

impl ExportedFiles {
    /// All written paths, processed data first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.processed_data.as_path())
            .chain(self.team_analysis.as_deref())
            .chain(self.player_analysis.as_deref())
    }
}

/// Generate the summary report and write it to the summaries directory.
///
/// Without `filename` the file is named `match_analysis_report_<timestamp>.txt`; a given name
/// gets a `.txt` extension if it lacks one.
pub fn save_report_to_file(
    dataset: &DataSet,
    options: &ExportOptions,
    filename: Option<&str>,
) -> AnalysisResult<PathBuf> {
    let report = generate_summary_report(dataset, Local::now().naive_local());
    write_report_text(&report, options, filename)
}

/// Write already-rendered report text; naming follows [`save_report_to_file`].
pub fn write_report_text(
    report: &str,
    options: &ExportOptions,
    filename: Option<&str>,
) -> AnalysisResult<PathBuf> {
    fs::create_dir_all(&options.summaries_dir)?;

    let filename = match filename {
        Some(name) if name.ends_with(".txt") => name.to_owned(),
        Some(name) => format!("{name}.txt"),
        None => format!("match_analysis_report_{}.txt", file_timestamp()),
    };
    let path = options.summaries_dir.join(filename);
    fs::write(&path, report)?;
    info!("report written to {}", path.display());
    Ok(path)
}

/// Export the processed table and the team / player tables as CSV.
///
/// The processed table is always written; team and player tables only when non-empty.
pub fn save_data_exports(
    dataset: &DataSet,
    options: &ExportOptions,
) -> AnalysisResult<ExportedFiles> {
    fs::create_dir_all(&options.summaries_dir)?;
    let ts = file_timestamp();

    let processed_data = options.summaries_dir.join(format!("processed_events_{ts}.csv"));
    write_dataset_csv(dataset, &processed_data)?;

    let teams = team_performance_analysis(dataset);
    let team_analysis = if teams.is_empty() {
        None
    } else {
        let path = options.summaries_dir.join(format!("team_analysis_{ts}.csv"));
        write_records_csv(&teams, &path)?;
        Some(path)
    };

    let players = player_performance_analysis(dataset);
    let player_analysis = if players.is_empty() {
        None
    } else {
        let path = options.summaries_dir.join(format!("player_analysis_{ts}.csv"));
        write_records_csv(&players, &path)?;
        Some(path)
    };

    let files = ExportedFiles {
        processed_data,
        team_analysis,
        player_analysis,
    };
    info!("exported {} data file(s)", files.paths().count());
    Ok(files)
}

/// Write a [`DataSet`] as CSV with a header row. Nulls are written as empty cells.
pub fn write_dataset_csv(dataset: &DataSet, path: &Path) -> AnalysisResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_records_csv<T: Serialize>(records: &[T], path: &Path) -> AnalysisResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
