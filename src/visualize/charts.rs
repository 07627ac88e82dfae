//! Chart renderers. Each draws one PNG into [`ChartOptions::plots_dir`] and returns its path.

use std::collections::BTreeSet;
use std::path::PathBuf;

use log::{error, info};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::analysis::tables::CrossTab;
use crate::analysis::time::bucket_of;
use crate::analysis::{
    columns, disciplinary_analysis, player_performance_analysis, team_performance_analysis,
    time_analysis, Col, Counts, ATTEMPT, FOUL,
};
use crate::error::{AnalysisError, AnalysisResult};
use crate::processing::{filter_eq_str, filter_flag};
use crate::types::DataSet;

use super::canvas::{self, Canvas, Color, Rect};

const MARGIN: u32 = 40;
const SHOT_JITTER: f64 = 0.02;
const HISTOGRAM_BINS: usize = 20;

/// Output location and size of rendered charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Created on demand.
    pub plots_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Players shown by [`plot_player_performance`] from the dashboard.
    pub top_players: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            plots_dir: PathBuf::from("output").join("plots"),
            width: 1500,
            height: 1200,
            top_players: 10,
        }
    }
}

impl ChartOptions {
    fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    fn save(&self, canvas: &Canvas, name: &str) -> AnalysisResult<PathBuf> {
        canvas.save_png(&self.plots_dir, name)
    }
}

fn require_column(dataset: &DataSet, column: &str) -> AnalysisResult<()> {
    if dataset.schema.contains(column) {
        Ok(())
    } else {
        Err(AnalysisError::missing_data(format!("table must have a '{column}' column")))
    }
}

fn panels(canvas: &Canvas, rows: u32, cols: u32) -> Vec<Rect> {
    canvas
        .bounds()
        .grid(rows, cols)
        .into_iter()
        .map(|r| r.inset(MARGIN))
        .collect()
}

fn as_f64(counts: impl IntoIterator<Item = usize>) -> Vec<f64> {
    counts.into_iter().map(|n| n as f64).collect()
}

/// Bars of event-type counts, most frequent first.
pub fn plot_event_distribution(
    dataset: &DataSet,
    options: &ChartOptions,
) -> AnalysisResult<PathBuf> {
    require_column(dataset, columns::EVENT_TYPE_LABEL)?;
    let counts = Counts::of_column(dataset, columns::EVENT_TYPE_LABEL).unwrap_or_default();

    let mut canvas = options.canvas();
    let values = as_f64(counts.iter().map(|(_, n)| n));
    let colors = canvas::palette(values.len());
    let area = canvas.bounds().inset(MARGIN);
    canvas.bars(area, &values, |i| colors[i]);
    options.save(&canvas, "event_distribution")
}

/// Goals, shots, accuracy and conversion per team, one panel each.
pub fn plot_team_performance(dataset: &DataSet, options: &ChartOptions) -> AnalysisResult<PathBuf> {
    let teams = team_performance_analysis(dataset);
    if teams.is_empty() {
        return Err(AnalysisError::missing_data("no team performance data available"));
    }

    let mut canvas = options.canvas();
    let p = panels(&canvas, 2, 2);
    let series: [(Vec<f64>, Color); 4] = [
        (teams.iter().map(|t| t.goals_scored as f64).collect(), canvas::SKYBLUE),
        (teams.iter().map(|t| t.total_shots as f64).collect(), canvas::LIGHTCORAL),
        (teams.iter().map(|t| t.shooting_accuracy).collect(), canvas::LIGHTGREEN),
        (teams.iter().map(|t| t.conversion_rate).collect(), canvas::GOLD),
    ];
    for (area, (values, color)) in p.into_iter().zip(series) {
        canvas.bars(area, &values, |_| color);
    }
    options.save(&canvas, "team_performance")
}

/// Goal heatmaps: location x body part, and situation x assist method.
pub fn plot_goals_heatmap(dataset: &DataSet, options: &ChartOptions) -> AnalysisResult<PathBuf> {
    require_column(dataset, columns::IS_GOAL)?;
    let goals = filter_flag(dataset, columns::IS_GOAL, 1);
    if goals.row_count() == 0 {
        return Err(AnalysisError::missing_data("no goals found in table"));
    }

    let crosstab = |row_col: &str, col_col: &str| -> Option<CrossTab> {
        let (r, c) = (Col::of(&goals, row_col), Col::of(&goals, col_col));
        (r.present() && c.present()).then(|| {
            CrossTab::from_pairs(
                goals
                    .rows
                    .iter()
                    .filter_map(|row| Some((r.key(row)?, c.key(row)?))),
            )
        })
    };

    let mut canvas = options.canvas();
    let p = panels(&canvas, 1, 2);
    let maps = [
        (
            crosstab(columns::LOCATION_LABEL, columns::BODYPART_LABEL),
            canvas::YELLOW,
            canvas::DARKRED,
        ),
        (
            crosstab(columns::SITUATION_LABEL, columns::ASSIST_METHOD_LABEL),
            canvas::WHITE,
            canvas::BLUE,
        ),
    ];
    for (area, (tab, low, high)) in p.into_iter().zip(maps) {
        if let Some(tab) = tab {
            let cells: Vec<&[usize]> =
                (0..tab.row_keys().len()).map(|i| tab.row_counts(i)).collect();
            canvas.heatmap(area, &cells, low, high);
        }
    }
    options.save(&canvas, "goals_heatmap")
}

/// Events and goals per time bucket, the goal timeline, and a 20-bin event histogram.
pub fn plot_time_analysis(dataset: &DataSet, options: &ChartOptions) -> AnalysisResult<PathBuf> {
    require_column(dataset, columns::TIME)?;
    let time = Col::of(dataset, columns::TIME);
    let goal = Col::of(dataset, columns::IS_GOAL);

    let mut per_bucket = [0usize; 7];
    for bucket in dataset.rows.iter().filter_map(|row| bucket_of(time, row)) {
        per_bucket[bucket as usize] += 1;
    }
    let minutes: Vec<f64> = dataset
        .rows
        .iter()
        .filter_map(|row| time.value(row).and_then(|v| v.as_f64()))
        .filter(|t| t.is_finite())
        .collect();

    let mut canvas = options.canvas();
    let p = panels(&canvas, 2, 2);

    canvas.bars(p[0], &as_f64(per_bucket), |_| canvas::STEELBLUE);

    if goal.present() {
        if let Some(goals) = time_analysis(dataset).and_then(|t| t.goals_by_time_period) {
            canvas.bars(p[1], &as_f64(goals.iter().map(|(_, n)| n)), |_| canvas::CRIMSON);
        }
        let timeline: Vec<(f64, f64)> = dataset
            .rows
            .iter()
            .filter(|row| goal.flag(row) == 1)
            .filter_map(|row| time.value(row).and_then(|v| v.as_f64()))
            .map(|t| (t, 1.0))
            .collect();
        canvas.axes(p[2]);
        canvas.scatter(p[2], &timeline, (0.0, 95.0), (0.5, 1.5), (10.0, canvas::RED, 0.6));
    }

    canvas.bars(p[3], &histogram(&minutes, HISTOGRAM_BINS), |_| canvas::ORANGE);
    options.save(&canvas, "time_analysis")
}

/// Equal-width bins between the smallest and largest value.
fn histogram(values: &[f64], bins: usize) -> Vec<f64> {
    let mut counts = vec![0.0; bins];
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if bins == 0 || values.is_empty() {
        return counts;
    }
    let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };
    for v in values {
        let i = (((v - lo) / width) as usize).min(bins - 1);
        counts[i] += 1.0;
    }
    counts
}

/// Goals, shots and conversion of the `top_n` scorers plus a goals-vs-shots scatter.
pub fn plot_player_performance(
    dataset: &DataSet,
    top_n: usize,
    options: &ChartOptions,
) -> AnalysisResult<PathBuf> {
    let players = player_performance_analysis(dataset);
    if players.is_empty() {
        return Err(AnalysisError::missing_data("no player performance data available"));
    }
    let top = &players[..top_n.min(players.len())];

    let mut canvas = options.canvas();
    let p = panels(&canvas, 2, 2);
    let goals: Vec<f64> = top.iter().map(|s| s.goals as f64).collect();
    let shots: Vec<f64> = top.iter().map(|s| s.shots_taken as f64).collect();
    let conversion: Vec<f64> = top.iter().map(|s| s.conversion_rate).collect();
    canvas.bars(p[0], &goals, |_| canvas::GOLD);
    canvas.bars(p[1], &shots, |_| canvas::SKYBLUE);
    canvas.bars(p[2], &conversion, |_| canvas::LIGHTGREEN);

    let points: Vec<(f64, f64)> = shots.iter().copied().zip(goals.iter().copied()).collect();
    let max_x = points.iter().map(|p| p.0).fold(1.0, f64::max);
    let max_y = points.iter().map(|p| p.1).fold(1.0, f64::max);
    canvas.axes(p[3]);
    let style = (10.0, canvas::PURPLE, 0.7);
    canvas.scatter(p[3], &points, (0.0, max_x * 1.1), (0.0, max_y * 1.1), style);

    options.save(&canvas, &format!("top_{top_n}_players"))
}

/// Card split, cards per team, fouls per time bucket, and fouls vs cards per team.
pub fn plot_disciplinary_analysis(
    dataset: &DataSet,
    options: &ChartOptions,
) -> AnalysisResult<PathBuf> {
    require_column(dataset, columns::EVENT_TYPE_LABEL)?;
    let summary = disciplinary_analysis(dataset)
        .ok_or_else(|| AnalysisError::missing_data("no event-type labels to analyse"))?;

    let mut canvas = options.canvas();
    let p = panels(&canvas, 2, 2);

    canvas.split_bar(
        p[0],
        &[
            (summary.yellow_cards as f64, canvas::YELLOW),
            (summary.red_cards as f64, canvas::RED),
            (summary.second_yellow_cards as f64, canvas::ORANGE),
        ],
    );

    if let Some(cards) = &summary.most_cards_by_team {
        let fewest_first = cards.clone().sorted_asc();
        canvas.hbars(p[1], &as_f64(fewest_first.iter().map(|(_, n)| n)), canvas::CORAL);
    }

    let time = Col::of(dataset, columns::TIME);
    if time.present() {
        let fouls = filter_eq_str(dataset, columns::EVENT_TYPE_LABEL, FOUL);
        let mut per_bucket = [0usize; 7];
        for bucket in fouls.rows.iter().filter_map(|row| bucket_of(time, row)) {
            per_bucket[bucket as usize] += 1;
        }
        if per_bucket.iter().any(|&n| n > 0) {
            canvas.bars(p[2], &as_f64(per_bucket), |_| canvas::DARKRED);
        }
    }

    if dataset.schema.contains(columns::EVENT_TEAM) {
        let fouls = summary.most_fouls_by_team.unwrap_or_default();
        let cards = summary.most_cards_by_team.unwrap_or_default();
        let teams: BTreeSet<&str> = fouls.iter().chain(cards.iter()).map(|(t, _)| t).collect();
        let foul_counts: Vec<f64> = teams.iter().map(|t| fouls.get(t) as f64).collect();
        let card_counts: Vec<f64> = teams.iter().map(|t| cards.get(t) as f64).collect();
        canvas.grouped_bars(
            p[3],
            &[(foul_counts.as_slice(), canvas::LIGHTCORAL), (card_counts.as_slice(), canvas::GOLD)],
        );
    }

    options.save(&canvas, "disciplinary_analysis")
}

/// Pitch position of a shot location label (`x` across, `y` distance from goal, both in `[0, 1]`).
fn shot_position(location: &str) -> Option<(f64, f64)> {
    let pos = match location {
        "Centre of the box" => (0.5, 0.3),
        "Left side of the box" => (0.3, 0.3),
        "Right side of the box" => (0.7, 0.3),
        "Penalty spot" => (0.5, 0.2),
        "Left side of the six yard box" => (0.4, 0.1),
        "Right side of the six yard box" => (0.6, 0.1),
        "Very close range" => (0.5, 0.05),
        "Outside the box" => (0.5, 0.5),
        "Long range" => (0.5, 0.7),
        "Left wing" => (0.2, 0.4),
        "Right wing" => (0.8, 0.4),
        _ => return None,
    };
    Some(pos)
}

/// Attempts placed by location with Gaussian jitter; goals red and larger, misses blue.
pub fn plot_shot_map(dataset: &DataSet, options: &ChartOptions) -> AnalysisResult<PathBuf> {
    plot_shot_map_with_rng(dataset, options, &mut rand::thread_rng())
}

/// [`plot_shot_map`] with a caller-supplied jitter source.
pub fn plot_shot_map_with_rng<R: Rng + ?Sized>(
    dataset: &DataSet,
    options: &ChartOptions,
    rng: &mut R,
) -> AnalysisResult<PathBuf> {
    require_column(dataset, columns::EVENT_TYPE_LABEL)?;
    let shots = filter_eq_str(dataset, columns::EVENT_TYPE_LABEL, ATTEMPT);
    if shots.row_count() == 0 {
        return Err(AnalysisError::missing_data("no shots found in table"));
    }
    let location = Col::of(&shots, columns::LOCATION_LABEL);
    let goal = Col::of(&shots, columns::IS_GOAL);

    let mut canvas = options.canvas();
    let side = options.width.min(options.height).saturating_sub(2 * MARGIN);
    let bounds = canvas.bounds();
    let pitch = Rect::new((bounds.w - side) / 2, (bounds.h - side) / 2, side, side);
    canvas.outline_rect(pitch, canvas::AXIS);
    draw_box(&mut canvas, pitch, (0.25, 0.0), (0.5, 0.35));
    draw_box(&mut canvas, pitch, (0.4, 0.0), (0.2, 0.1));

    let unit = f64::from(side) / 100.0;
    for row in &shots.rows {
        let Some((x, y)) = location.str(row).and_then(shot_position) else {
            continue;
        };
        let jx: f64 = StandardNormal.sample(&mut *rng);
        let jy: f64 = StandardNormal.sample(&mut *rng);
        let point = (x + jx * SHOT_JITTER, y + jy * SHOT_JITTER);
        let (px, py) = Canvas::project(pitch, point, (0.0, 1.0), (0.0, 1.0));
        if goal.flag(row) > 0 {
            canvas.fill_circle(px, py, 1.4 * unit, canvas::RED, 0.8);
        } else {
            canvas.fill_circle(px, py, unit, canvas::BLUE, 0.5);
        }
    }
    options.save(&canvas, "shot_map")
}

/// Outline a pitch-space box given its bottom-left corner and size.
fn draw_box(canvas: &mut Canvas, pitch: Rect, (x, y): (f64, f64), (w, h): (f64, f64)) {
    let (left, top) = Canvas::project(pitch, (x, y + h), (0.0, 1.0), (0.0, 1.0));
    let (right, bottom) = Canvas::project(pitch, (x + w, y), (0.0, 1.0), (0.0, 1.0));
    let rect = Rect::new(
        left.max(0.0) as u32,
        top.max(0.0) as u32,
        (right - left).max(1.0) as u32,
        (bottom - top).max(1.0) as u32,
    );
    canvas.outline_rect(rect, canvas::BLACK);
}

/// Render the six dashboard charts in order.
///
/// Stops at the first chart that fails (the error is logged) and returns the paths saved up to
/// that point.
pub fn create_dashboard(dataset: &DataSet, options: &ChartOptions) -> Vec<PathBuf> {
    type Chart<'a> = (&'a str, Box<dyn Fn() -> AnalysisResult<PathBuf> + 'a>);
    let charts: [Chart<'_>; 6] = [
        ("event distribution", Box::new(|| plot_event_distribution(dataset, options))),
        ("team performance", Box::new(|| plot_team_performance(dataset, options))),
        ("goals heatmap", Box::new(|| plot_goals_heatmap(dataset, options))),
        ("time analysis", Box::new(|| plot_time_analysis(dataset, options))),
        (
            "player performance",
            Box::new(|| plot_player_performance(dataset, options.top_players, options)),
        ),
        ("disciplinary analysis", Box::new(|| plot_disciplinary_analysis(dataset, options))),
    ];

    info!("creating visualization dashboard");
    let mut saved = Vec::new();
    for (name, render) in &charts {
        info!("creating {name} chart");
        match render() {
            Ok(path) => saved.push(path),
            Err(e) => {
                error!("error creating {name} chart: {e}");
                return saved;
            }
        }
    }
    info!(
        "dashboard created: {} charts saved to {}",
        saved.len(),
        options.plots_dir.display()
    );
    saved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema, Value};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::Path;

    fn options(dir: &Path) -> ChartOptions {
        ChartOptions {
            plots_dir: dir.to_path_buf(),
            width: 300,
            height: 240,
            top_players: 3,
        }
    }

    fn events() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id_event", DataType::Utf8),
            Field::new("time", DataType::Int64),
            Field::new("event_team", DataType::Utf8),
            Field::new("player", DataType::Utf8),
            Field::new("is_goal", DataType::Int64),
            Field::new("event_type_label", DataType::Utf8),
            Field::new("location_label", DataType::Utf8),
        ]);
        let s = |v: &str| Value::Utf8(v.to_string());
        let row = |id: &str, t: i64, team: &str, player: &str, goal: i64, label: &str, loc: &str| {
            vec![s(id), Value::Int64(t), s(team), s(player), Value::Int64(goal), s(label), s(loc)]
        };
        DataSet::new(
            schema,
            vec![
                row("e1", 5, "Lyon", "fekir", 1, "Attempt", "Centre of the box"),
                row("e2", 20, "Lyon", "lacazette", 0, "Attempt", "Long range"),
                row("e3", 33, "Nice", "balotelli", 0, "Foul", "Unknown"),
                row("e4", 70, "Nice", "balotelli", 0, "Yellow card", "Unknown"),
                row("e5", 92, "Nice", "plea", 1, "Attempt", "Penalty spot"),
            ],
        )
    }

    #[test]
    fn histogram_puts_maximum_in_last_bin() {
        let h = histogram(&[0.0, 50.0, 100.0], 4);
        assert_eq!(h, vec![1.0, 0.0, 1.0, 1.0]);
        assert_eq!(histogram(&[], 3), vec![0.0; 3]);
        assert_eq!(histogram(&[7.0, 7.0], 2), vec![2.0, 0.0]);
    }

    #[test]
    fn missing_label_column_is_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let ds = DataSet::new(Schema::new(vec![Field::new("time", DataType::Int64)]), vec![]);
        let err = plot_event_distribution(&ds, &options(dir.path())).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingData { .. }));
        assert!(matches!(
            plot_shot_map(&ds, &options(dir.path())),
            Err(AnalysisError::MissingData { .. })
        ));
    }

    #[test]
    fn shot_map_is_written_with_seeded_jitter() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let path = plot_shot_map_with_rng(&events(), &options(dir.path()), &mut rng).unwrap();
        assert!(path.exists());
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("shot_map_"));
    }

    #[test]
    fn player_chart_is_named_after_top_n() {
        let dir = tempfile::tempdir().unwrap();
        let path = plot_player_performance(&events(), 3, &options(dir.path())).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("top_3_players_"));
    }

    #[test]
    fn dashboard_renders_all_six_charts() {
        let dir = tempfile::tempdir().unwrap();
        let saved = create_dashboard(&events(), &options(dir.path()));
        assert_eq!(saved.len(), 6);
        assert!(saved.iter().all(|p| p.exists()));
    }

    #[test]
    fn dashboard_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        // no goals: the heatmap (third chart) fails
        let ds = filter_flag(&events(), "is_goal", 0);
        let saved = create_dashboard(&ds, &options(dir.path()));
        assert_eq!(saved.len(), 2);
    }
}
