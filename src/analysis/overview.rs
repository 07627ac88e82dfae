//! Whole-table overview.

use serde::Serialize;

use crate::processing::{filter_eq_str, reduce, ReduceOp};
use crate::types::{DataSet, Value};

use super::tables::{percentage, Counts};
use super::{columns, Col, ATTEMPT, ON_TARGET};

/// Shot summary over the "Attempt" rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotAnalysis {
    pub total_shots: usize,
    pub shots_on_target: usize,
    /// Goals per shot, in percent, two decimals.
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_events: usize,
    pub unique_teams: usize,
    pub unique_players: usize,
    pub total_goals: u64,
    /// Events per side label (`None` without a side column).
    pub home_vs_away: Option<Counts>,
    /// Events per event-type label (`None` without an event-type column).
    pub event_breakdown: Option<Counts>,
    /// `None` when there are no attempts.
    pub shot_analysis: Option<ShotAnalysis>,
    pub shot_outcome_breakdown: Option<Counts>,
}

/// Summarise a decoded event table.
pub fn analyze_events_overview(dataset: &DataSet) -> Overview {
    let count = |column: &str, op: ReduceOp| {
        reduce(dataset, column, op)
            .and_then(|v| v.as_i64())
            .map_or(0, |n| n.max(0) as usize)
    };

    let mut overview = Overview {
        total_events: dataset.row_count(),
        unique_teams: count(columns::EVENT_TEAM, ReduceOp::CountDistinct),
        unique_players: count(columns::PLAYER, ReduceOp::CountDistinct),
        total_goals: goal_total(dataset),
        home_vs_away: Counts::of_column(dataset, columns::SIDE_LABEL),
        event_breakdown: Counts::of_column(dataset, columns::EVENT_TYPE_LABEL),
        shot_analysis: None,
        shot_outcome_breakdown: None,
    };

    if !dataset.schema.contains(columns::EVENT_TYPE_LABEL) {
        return overview;
    }

    let shots = filter_eq_str(dataset, columns::EVENT_TYPE_LABEL, ATTEMPT);
    if shots.row_count() == 0 {
        return overview;
    }

    let outcome = Col::of(&shots, columns::SHOT_OUTCOME_LABEL);
    let on_target = shots.rows.iter().filter(|row| outcome.is(row, ON_TARGET)).count();
    let conversion_rate = if shots.schema.contains(columns::IS_GOAL) {
        percentage(goal_total(&shots), shots.row_count() as u64)
    } else {
        0.0
    };

    overview.shot_analysis = Some(ShotAnalysis {
        total_shots: shots.row_count(),
        shots_on_target: on_target,
        conversion_rate,
    });
    overview.shot_outcome_breakdown = Counts::of_column(&shots, columns::SHOT_OUTCOME_LABEL);
    overview
}

/// Sum of the goal flag column (0 when absent).
pub(crate) fn goal_total(dataset: &DataSet) -> u64 {
    match reduce(dataset, columns::IS_GOAL, ReduceOp::Sum) {
        Some(Value::Int64(n)) => n.max(0) as u64,
        Some(Value::Float64(f)) if f > 0.0 => f.round() as u64,
        _ => 0,
    }
}
