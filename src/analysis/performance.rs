//! Per-team and per-player rollups.
//!
//! Both analyses follow the same shape: base counts over every event of the group, shot metrics
//! over the group's "Attempt" events, then a left join of the shot metrics onto the base counts in
//! which groups without attempts get all-zero metrics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::processing::filter_eq_str;
use crate::types::{DataSet, Value};

use super::tables::{group_rows, left_join_or_default, percentage};
use super::{columns, Col, ATTEMPT, ON_TARGET};

/// One row of the team table. Field order is the CSV export column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub event_team: String,
    pub goals_scored: u64,
    pub total_events: u64,
    pub total_shots: u64,
    pub goals_from_shots: u64,
    pub shots_on_target: u64,
    pub shooting_accuracy: f64,
    pub conversion_rate: f64,
}

/// One row of the player table. Field order is the CSV export column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub player: String,
    pub event_team: String,
    /// Goals over all of the player's events.
    pub goals: u64,
    pub total_events: u64,
    pub shots_taken: u64,
    /// Goals over the player's attempts only.
    pub goals_scored: u64,
    pub shots_on_target: u64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct BaseCounts {
    goals: u64,
    events: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ShotMetrics {
    shots: u64,
    goals: u64,
    on_target: u64,
}

impl ShotMetrics {
    fn accuracy(&self) -> f64 {
        percentage(self.on_target, self.shots)
    }

    fn conversion(&self) -> f64 {
        percentage(self.goals, self.shots)
    }
}

/// Goals, events and shot metrics per team, ordered by team name.
///
/// Returns an empty vector when the table has no team column.
pub fn team_performance_analysis(dataset: &DataSet) -> Vec<TeamStats> {
    let team = Col::of(dataset, columns::EVENT_TEAM);
    if !team.present() {
        return Vec::new();
    }

    let key = |row: &[Value]| team.key(row);
    rollup(dataset, key)
        .into_iter()
        .map(|(event_team, base, shots)| TeamStats {
            event_team,
            goals_scored: base.goals,
            total_events: base.events,
            total_shots: shots.shots,
            goals_from_shots: shots.goals,
            shots_on_target: shots.on_target,
            shooting_accuracy: shots.accuracy(),
            conversion_rate: shots.conversion(),
        })
        .collect()
}

/// Goals, events and shot metrics per `(player, team)`, most goals first.
///
/// Groups come out of the grouping in `(player, team)` order and the goal sort is stable, so
/// players with equal goals stay in that order. Returns an empty vector when the table has no
/// player column.
pub fn player_performance_analysis(dataset: &DataSet) -> Vec<PlayerStats> {
    let player = Col::of(dataset, columns::PLAYER);
    if !player.present() {
        return Vec::new();
    }
    let team = Col::of(dataset, columns::EVENT_TEAM);

    let key = |row: &[Value]| Some((player.key(row)?, team.key(row)?));
    let mut stats: Vec<PlayerStats> = rollup(dataset, key)
        .into_iter()
        .map(|((player, event_team), base, shots)| PlayerStats {
            player,
            event_team,
            goals: base.goals,
            total_events: base.events,
            shots_taken: shots.shots,
            goals_scored: shots.goals,
            shots_on_target: shots.on_target,
            conversion_rate: shots.conversion(),
        })
        .collect();

    stats.sort_by(|a, b| b.goals.cmp(&a.goals));
    stats
}

fn rollup<K, F>(dataset: &DataSet, key: F) -> Vec<(K, BaseCounts, ShotMetrics)>
where
    K: Ord + Clone,
    F: Fn(&[Value]) -> Option<K>,
{
    let goal = Col::of(dataset, columns::IS_GOAL);
    let id = Col::of(dataset, columns::ID_EVENT);

    let base: BTreeMap<K, BaseCounts> = group_rows(dataset, |row| key(row))
        .into_iter()
        .map(|(k, rows)| {
            let events = if id.present() {
                rows.iter().filter(|row| id.value(row).is_some()).count()
            } else {
                rows.len()
            };
            let counts = BaseCounts {
                goals: rows.iter().map(|row| goal.flag(row)).sum(),
                events: events as u64,
            };
            (k, counts)
        })
        .collect();

    let shots = filter_eq_str(dataset, columns::EVENT_TYPE_LABEL, ATTEMPT);
    let outcome = Col::of(&shots, columns::SHOT_OUTCOME_LABEL);
    let shot_goal = Col::of(&shots, columns::IS_GOAL);
    let shot_id = Col::of(&shots, columns::ID_EVENT);
    let metrics: BTreeMap<K, ShotMetrics> = group_rows(&shots, |row| key(row))
        .into_iter()
        .map(|(k, rows)| {
            let shots = if shot_id.present() {
                rows.iter().filter(|row| shot_id.value(row).is_some()).count()
            } else {
                rows.len()
            };
            let m = ShotMetrics {
                shots: shots as u64,
                goals: rows.iter().map(|row| shot_goal.flag(row)).sum(),
                on_target: rows.iter().filter(|row| outcome.is(row, ON_TARGET)).count() as u64,
            };
            (k, m)
        })
        .collect();

    left_join_or_default(base, &metrics)
}
