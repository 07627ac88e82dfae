use std::fs;
use std::iter::repeat;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use match_event_analysis::pipeline::{run_pipeline, PipelineOptions};
use match_event_analysis::report::{generate_summary_report, save_report_to_file, ExportOptions};
use match_event_analysis::types::{DataSet, DataType, Field, Schema, Value};
use match_event_analysis::visualize::ChartOptions;
use match_event_analysis::AnalysisError;

fn options_into(out: &Path, render_charts: bool) -> PipelineOptions {
    let mut opts = PipelineOptions::default();
    opts.load.raw_data_dir = PathBuf::from("tests").join("fixtures");
    opts.export = ExportOptions {
        summaries_dir: out.join("summaries"),
    };
    opts.charts = ChartOptions {
        plots_dir: out.join("plots"),
        width: 400,
        height: 300,
        top_players: 5,
    };
    opts.render_charts = render_charts;
    opts
}

#[test]
fn pipeline_writes_report_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_pipeline(&options_into(dir.path(), false)).unwrap();

    assert_eq!(outcome.raw_shape, (12, 19));
    assert_eq!(outcome.events.row_count(), 10);

    let files = outcome.outputs.as_ref().unwrap();
    assert_eq!(fs::read_to_string(&files.report).unwrap(), outcome.report);
    assert!(files.charts.is_empty());

    let processed = fs::read_to_string(&files.data.processed_data).unwrap();
    assert_eq!(processed.lines().count(), 11);
    assert!(processed.starts_with("id_odsp,id_event,time,"));

    let teams = fs::read_to_string(files.data.team_analysis.as_ref().unwrap()).unwrap();
    let mut lines = teams.lines();
    assert_eq!(
        lines.next(),
        Some(
            "event_team,goals_scored,total_events,total_shots,goals_from_shots,shots_on_target,\
             shooting_accuracy,conversion_rate"
        )
    );
    assert_eq!(lines.next(), Some("Lyon,2,5,3,2,2,66.67,66.67"));

    let players = fs::read_to_string(files.data.player_analysis.as_ref().unwrap()).unwrap();
    assert_eq!(players.lines().nth(1), Some("depay,Lyon,1,2,1,1,1,100.0"));
}

#[test]
fn pipeline_renders_dashboard_charts() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_pipeline(&options_into(dir.path(), true)).unwrap();
    let files = outcome.outputs.unwrap();
    assert_eq!(files.charts.len(), 6);
    assert!(files.charts.iter().all(|p| p.starts_with(dir.path().join("plots"))));
}

#[test]
fn missing_input_halts_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options_into(dir.path(), false);
    opts.input_file = "missing.csv".to_string();
    assert!(matches!(run_pipeline(&opts), Err(AnalysisError::FileNotFound { .. })));
    assert!(!dir.path().join("summaries").exists());
}

#[test]
fn export_failure_keeps_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let mut opts = options_into(dir.path(), false);
    opts.export.summaries_dir = blocker.join("summaries");
    let outcome = run_pipeline(&opts).unwrap();

    assert!(outcome.outputs.is_err());
    assert!(outcome.report.contains("FOOTBALL MATCH ANALYSIS REPORT"));
    assert!(outcome.report_preview(opts.preview_chars).chars().count() <= 1000);
}

#[test]
fn report_sections_for_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_pipeline(&options_into(dir.path(), false)).unwrap();
    let at = NaiveDate::from_ymd_opt(2017, 1, 28)
        .and_then(|d| d.and_hms_opt(20, 0, 0))
        .unwrap();
    let report = generate_summary_report(&outcome.events, at);

    assert!(report.contains("Generated: 2017-01-28 20:00:00"));
    assert!(report.contains("Total Goals:                  3"));
    assert!(report.contains("  Conversion Rate:        60.0%"));
    assert!(report.contains("Lyon            2        3        66.7%      66.7%"));
    assert!(report.contains("  right foot:            2 goals"));
    assert!(report.contains("  15-30min:         1 goals"));
    assert!(report.contains("    Nice:                2 cards"));
    assert!(report.ends_with(&format!("END OF REPORT\n{}", "=".repeat(70))));

    let opts = ExportOptions {
        summaries_dir: dir.path().join("named"),
    };
    let path = save_report_to_file(&outcome.events, &opts, Some("fixture_report")).unwrap();
    assert_eq!(path.file_name().unwrap(), "fixture_report.txt");
}

fn event(team: &str, label: &str, goal_location: Option<&str>) -> Vec<Value> {
    vec![
        Value::Utf8(team.to_string()),
        Value::Utf8(label.to_string()),
        Value::Int64(i64::from(goal_location.is_some())),
        goal_location.map_or(Value::Null, |l| Value::Utf8(l.to_string())),
    ]
}

fn repeated<'a>(counts: &'a [(&'a str, usize)]) -> impl Iterator<Item = &'a str> + 'a {
    counts.iter().flat_map(|(label, n)| repeat(*label).take(*n))
}

/// Seven teams, eleven event types, six goal locations and five teams with distinct card counts.
fn league_events() -> DataSet {
    let schema = Schema::new(vec![
        Field::new("event_team", DataType::Utf8),
        Field::new("event_type_label", DataType::Utf8),
        Field::new("is_goal", DataType::Int64),
        Field::new("location_label", DataType::Utf8),
    ]);
    let mut rows = Vec::new();

    let locations = [
        ("Centre of the box", 6),
        ("Left side of the box", 5),
        ("Right side of the box", 4),
        ("Outside the box", 3),
        ("Very close range", 2),
        ("Difficult angle on the left", 1),
    ];
    for (i, location) in repeated(&locations).enumerate() {
        let team = if i < 11 { "Angers" } else { "Bastia" };
        rows.push(event(team, "Attempt", Some(location)));
    }
    rows.push(event("Angers", "Attempt", None));
    rows.push(event("Bastia", "Attempt", None));
    rows.push(event("Bastia", "Attempt", None));

    let cards = [("Yellow card", 9), ("Second yellow card", 2), ("Red card", 4)];
    let offenders = [("Lille", 5), ("Angers", 4), ("Caen", 3), ("Dijon", 2), ("Bastia", 1)];
    for (team, card) in repeated(&offenders).zip(repeated(&cards)) {
        rows.push(event(team, card, None));
    }

    let others = [
        ("Foul", 16),
        ("Corner", 8),
        ("Free kick won", 7),
        ("Offside", 6),
        ("Substitution", 5),
        ("Hand ball", 3),
        ("Penalty conceded", 1),
    ];
    for (i, label) in repeated(&others).enumerate() {
        let team = if i % 2 == 0 { "Lorient" } else { "Metz" };
        rows.push(event(team, label, None));
    }

    DataSet::new(schema, rows)
}

/// Lines following the line containing `title`, up to the next blank line.
fn section<'a>(report: &'a str, title: &str) -> Vec<&'a str> {
    report
        .lines()
        .skip_while(|l| !l.contains(title))
        .skip(1)
        .take_while(|l| !l.is_empty())
        .collect()
}

#[test]
fn report_cuts_and_orders_long_tables() {
    let at = NaiveDate::from_ymd_opt(2017, 3, 4)
        .and_then(|d| d.and_hms_opt(15, 0, 0))
        .unwrap();
    let report = generate_summary_report(&league_events(), at);

    assert_eq!(
        section(&report, "EVENT BREAKDOWN (Top 10)"),
        vec![
            "  Attempt:                      24",
            "  Foul:                         16",
            "  Yellow card:                   9",
            "  Corner:                        8",
            "  Free kick won:                 7",
            "  Offside:                       6",
            "  Substitution:                  5",
            "  Red card:                      4",
            "  Hand ball:                     3",
            "  Second yellow card:            2",
        ]
    );
    assert!(!report.contains("Penalty conceded"));

    let teams = section(&report, "TEAM PERFORMANCE");
    assert_eq!(
        teams[2..],
        [
            "Angers          11       12       0.0%       91.7%     ",
            "Bastia          10       12       0.0%       83.3%     ",
            "Caen            0        0        N/A        N/A       ",
            "Dijon           0        0        N/A        N/A       ",
            "Lille           0        0        N/A        N/A       ",
        ]
    );
    assert!(!report.contains("Lorient"));
    assert!(!report.contains("Metz"));

    assert_eq!(
        section(&report, "TOP SCORING LOCATIONS"),
        vec![
            "  Centre of the box:                    6 goals",
            "  Left side of the box:                 5 goals",
            "  Right side of the box:                4 goals",
            "  Outside the box:                      3 goals",
            "  Very close range:                     2 goals",
        ]
    );
    assert!(!report.contains("Difficult angle on the left"));

    assert!(report.contains("  Total Cards:             15"));
    assert_eq!(
        section(&report, "Most Disciplined Teams"),
        vec![
            "    Bastia:              1 cards",
            "    Dijon:               2 cards",
            "    Caen:                3 cards",
        ]
    );
}
