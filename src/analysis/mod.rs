//! Aggregations over a decoded event table.
//!
//! Every function here expects a table that has already been through
//! [`crate::processing::decode_categorical_data`]: they key off the `*_label` columns, not the raw
//! codes. All of them are pure, and a missing column means "feature unavailable": the result is
//! empty or partial rather than an error.
//!
//! - [`analyze_events_overview`]: totals, side / event-type breakdowns, shot summary
//! - [`team_performance_analysis`] / [`player_performance_analysis`]: per-group rollups
//! - [`location_analysis`]: where and how goals were scored
//! - [`disciplinary_analysis`]: fouls and cards
//! - [`time_analysis`]: events and goals per 15-minute bucket
//!
//! ```rust
//! use match_event_analysis::analysis::analyze_events_overview;
//! use match_event_analysis::processing::decode_categorical_data;
//! use match_event_analysis::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let raw = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("event_type", DataType::Int64),
//!         Field::new("shot_outcome", DataType::Int64),
//!         Field::new("is_goal", DataType::Int64),
//!     ]),
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(1), Value::Int64(1)],
//!         vec![Value::Int64(1), Value::Int64(2), Value::Int64(0)],
//!     ],
//! );
//! let overview = analyze_events_overview(&decode_categorical_data(&raw));
//! let shots = overview.shot_analysis.unwrap();
//! assert_eq!(shots.total_shots, 2);
//! assert_eq!(shots.conversion_rate, 50.0);
//! ```

pub mod discipline;
pub mod location;
pub mod overview;
pub mod performance;
pub mod tables;
pub mod time;

pub use discipline::{disciplinary_analysis, DisciplineSummary};
pub use location::{location_analysis, LocationBreakdown};
pub use overview::{analyze_events_overview, Overview, ShotAnalysis};
pub use performance::{
    player_performance_analysis, team_performance_analysis, PlayerStats, TeamStats,
};
pub use tables::{Counts, CrossTab};
pub use time::{time_analysis, TimeBreakdown, TimeBucket};

use crate::types::{DataSet, Value};

/// Column names the aggregations read.
pub mod columns {
    pub const ID_EVENT: &str = "id_event";
    pub const TIME: &str = "time";
    pub const EVENT_TEAM: &str = "event_team";
    pub const PLAYER: &str = "player";
    pub const IS_GOAL: &str = "is_goal";
    pub const EVENT_TYPE_LABEL: &str = "event_type_label";
    pub const SHOT_OUTCOME_LABEL: &str = "shot_outcome_label";
    pub const LOCATION_LABEL: &str = "location_label";
    pub const BODYPART_LABEL: &str = "bodypart_label";
    pub const ASSIST_METHOD_LABEL: &str = "assist_method_label";
    pub const SITUATION_LABEL: &str = "situation_label";
    pub const SIDE_LABEL: &str = "side_label";
}

/// Event-type label of a shot.
pub const ATTEMPT: &str = "Attempt";
/// Shot-outcome label of a shot on target.
pub const ON_TARGET: &str = "On target";
pub const FOUL: &str = "Foul";
pub const YELLOW_CARD: &str = "Yellow card";
pub const SECOND_YELLOW_CARD: &str = "Second yellow card";
pub const RED_CARD: &str = "Red card";
/// Event-type labels counted as cards.
pub const CARD_LABELS: [&str; 3] = [YELLOW_CARD, SECOND_YELLOW_CARD, RED_CARD];

/// Resolved column positions for per-row access.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Col(Option<usize>);

impl Col {
    pub(crate) fn of(dataset: &DataSet, name: &str) -> Self {
        Self(dataset.schema.index_of(name))
    }

    pub(crate) fn present(self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn value(self, row: &[Value]) -> Option<&Value> {
        self.0.and_then(|i| row.get(i)).filter(|v| !v.is_null())
    }

    pub(crate) fn str(self, row: &[Value]) -> Option<&str> {
        self.value(row).and_then(Value::as_str)
    }

    /// Cell rendered as a grouping key (team and player names may load as numbers).
    pub(crate) fn key(self, row: &[Value]) -> Option<String> {
        self.value(row).map(Value::to_string)
    }

    pub(crate) fn is(self, row: &[Value], label: &str) -> bool {
        self.str(row) == Some(label)
    }

    /// Goal-flag contribution of a row: the integral flag value, nulls counting as 0.
    pub(crate) fn flag(self, row: &[Value]) -> u64 {
        self.value(row)
            .and_then(Value::as_i64)
            .map_or(0, |v| v.max(0) as u64)
    }
}
