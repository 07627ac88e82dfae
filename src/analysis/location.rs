//! Goal breakdowns by pitch location, body part, situation, assist and side.

use serde::Serialize;

use crate::processing::filter_flag;
use crate::types::DataSet;

use super::columns;
use super::tables::Counts;

/// Goal counts per label. Each table is `None` when its label column is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationBreakdown {
    pub goals_by_location: Option<Counts>,
    pub goals_by_bodypart: Option<Counts>,
    pub goals_by_situation: Option<Counts>,
    pub goals_by_assist: Option<Counts>,
    pub goals_by_side: Option<Counts>,
}

impl LocationBreakdown {
    /// `true` when no breakdown could be computed.
    pub fn is_empty(&self) -> bool {
        self.goals_by_location.is_none()
            && self.goals_by_bodypart.is_none()
            && self.goals_by_situation.is_none()
            && self.goals_by_assist.is_none()
            && self.goals_by_side.is_none()
    }
}

/// Break goals (`is_goal == 1`) down by each decoded label.
///
/// Empty when the table has no goal column or no goals.
pub fn location_analysis(dataset: &DataSet) -> LocationBreakdown {
    if !dataset.schema.contains(columns::IS_GOAL) {
        return LocationBreakdown::default();
    }
    let goals = filter_flag(dataset, columns::IS_GOAL, 1);
    if goals.row_count() == 0 {
        return LocationBreakdown::default();
    }

    LocationBreakdown {
        goals_by_location: Counts::of_column(&goals, columns::LOCATION_LABEL),
        goals_by_bodypart: Counts::of_column(&goals, columns::BODYPART_LABEL),
        goals_by_situation: Counts::of_column(&goals, columns::SITUATION_LABEL),
        goals_by_assist: Counts::of_column(&goals, columns::ASSIST_METHOD_LABEL),
        goals_by_side: Counts::of_column(&goals, columns::SIDE_LABEL),
    }
}
