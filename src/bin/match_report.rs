//! Runs the match-event pipeline over `data/raw/events.csv` and writes the report, CSV exports and
//! charts under `output/`.

use std::sync::Arc;

use match_event_analysis::AnalysisResult;
use match_event_analysis::ingestion::StdOutObserver;
use match_event_analysis::pipeline::{run_pipeline, PipelineOptions};

fn main() -> AnalysisResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let mut options = PipelineOptions::default();
    options.load.observer = Some(Arc::new(StdOutObserver));

    println!("Running match event analysis...");
    let outcome = run_pipeline(&options)?;
    println!(
        "Loaded {} rows x {} columns; {} events after cleaning",
        outcome.raw_shape.0,
        outcome.raw_shape.1,
        outcome.events.row_count()
    );

    match &outcome.outputs {
        Ok(files) => {
            println!("\nReport saved to: {}", files.report.display());
            println!("Data exports:");
            for path in files.data.paths() {
                println!("  {}", path.display());
            }
            if !files.charts.is_empty() {
                println!("Charts ({}):", files.charts.len());
                for path in &files.charts {
                    println!("  {}", path.display());
                }
            }
            println!("\nReport preview:\n");
            println!("{}", outcome.report_preview(options.preview_chars));
            if outcome.report.chars().count() > options.preview_chars {
                println!("...");
            }
        }
        Err(e) => {
            println!("\nOutputs could not be written ({e}); full report follows:\n");
            println!("{}", outcome.report);
        }
    }
    Ok(())
}
