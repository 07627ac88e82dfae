//! PNG charts over a decoded event table.
//!
//! Charts are drawn with [`canvas::Canvas`] on top of the `image` crate and carry no text; each
//! file is named `<chart>_<timestamp>.png` under [`ChartOptions::plots_dir`].

pub mod canvas;
pub mod charts;

pub use charts::{
    create_dashboard, plot_disciplinary_analysis, plot_event_distribution, plot_goals_heatmap,
    plot_player_performance, plot_shot_map, plot_shot_map_with_rng, plot_team_performance,
    plot_time_analysis, ChartOptions,
};
