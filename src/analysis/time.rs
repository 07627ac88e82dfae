//! Events and goals per match-time bucket.

use std::fmt;

use serde::Serialize;

use crate::types::{DataSet, Value};

use super::tables::{Counts, CrossTab};
use super::{columns, Col};

/// Fixed 15-minute match-time buckets.
///
/// The first bucket is closed (`[0, 15]`); the rest are half-open on the left (`(15, 30]`, ...),
/// and the last one is unbounded (`(90, inf)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeBucket {
    UpTo15,
    UpTo30,
    UpTo45,
    UpTo60,
    UpTo75,
    UpTo90,
    Stoppage,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 7] = [
        TimeBucket::UpTo15,
        TimeBucket::UpTo30,
        TimeBucket::UpTo45,
        TimeBucket::UpTo60,
        TimeBucket::UpTo75,
        TimeBucket::UpTo90,
        TimeBucket::Stoppage,
    ];

    /// Bucket for an elapsed time in minutes. Negative and `NaN` times have no bucket.
    pub fn from_minutes(minutes: f64) -> Option<Self> {
        if minutes.is_nan() || minutes < 0.0 {
            return None;
        }
        let bucket = match minutes {
            m if m <= 15.0 => TimeBucket::UpTo15,
            m if m <= 30.0 => TimeBucket::UpTo30,
            m if m <= 45.0 => TimeBucket::UpTo45,
            m if m <= 60.0 => TimeBucket::UpTo60,
            m if m <= 75.0 => TimeBucket::UpTo75,
            m if m <= 90.0 => TimeBucket::UpTo90,
            _ => TimeBucket::Stoppage,
        };
        Some(bucket)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeBucket::UpTo15 => "0-15min",
            TimeBucket::UpTo30 => "15-30min",
            TimeBucket::UpTo45 => "30-45min",
            TimeBucket::UpTo60 => "45-60min",
            TimeBucket::UpTo75 => "60-75min",
            TimeBucket::UpTo90 => "75-90min",
            TimeBucket::Stoppage => "90+min",
        }
    }

    fn labels() -> Vec<String> {
        Self::ALL.iter().map(|b| b.label().to_owned()).collect()
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBreakdown {
    /// Bucket x event-type label; every bucket is a row (`None` without an event-type column).
    pub events_by_time_period: Option<CrossTab>,
    /// Goals per bucket in bucket order, zero-filled (`None` without a goal column).
    pub goals_by_time_period: Option<Counts>,
}

/// Bucket a row's `time` cell.
pub(crate) fn bucket_of(time: Col, row: &[Value]) -> Option<TimeBucket> {
    time.value(row)
        .and_then(|v| v.as_f64())
        .and_then(TimeBucket::from_minutes)
}

/// Tabulate events and goals per time bucket.
///
/// `None` when the table has no `time` column.
pub fn time_analysis(dataset: &DataSet) -> Option<TimeBreakdown> {
    let time = Col::of(dataset, columns::TIME);
    if !time.present() {
        return None;
    }
    let label = Col::of(dataset, columns::EVENT_TYPE_LABEL);
    let goal = Col::of(dataset, columns::IS_GOAL);

    let events_by_time_period = label.present().then(|| {
        CrossTab::with_row_order(
            TimeBucket::labels(),
            dataset.rows.iter().filter_map(|row| {
                let bucket = bucket_of(time, row)?;
                Some((bucket.label().to_owned(), label.str(row)?.to_owned()))
            }),
        )
    });

    let goals_by_time_period = goal.present().then(|| {
        let mut per_bucket = [0usize; 7];
        for row in &dataset.rows {
            if goal.value(row).and_then(|v| v.as_i64()) != Some(1) {
                continue;
            }
            if let Some(bucket) = bucket_of(time, row) {
                per_bucket[bucket as usize] += 1;
            }
        }
        TimeBucket::ALL
            .iter()
            .zip(per_bucket)
            .map(|(b, n)| (b.label(), n))
            .collect::<Counts>()
    });

    Some(TimeBreakdown {
        events_by_time_period,
        goals_by_time_period,
    })
}

#[cfg(test)]
mod tests {
    use super::{time_analysis, TimeBucket};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    #[test]
    fn buckets_are_closed_on_the_right() {
        let labels: Vec<_> = [10.0, 44.0, 46.0, 91.0]
            .into_iter()
            .map(|t| TimeBucket::from_minutes(t).unwrap().label())
            .collect();
        assert_eq!(labels, vec!["0-15min", "30-45min", "45-60min", "90+min"]);

        assert_eq!(TimeBucket::from_minutes(0.0), Some(TimeBucket::UpTo15));
        assert_eq!(TimeBucket::from_minutes(15.0), Some(TimeBucket::UpTo15));
        assert_eq!(TimeBucket::from_minutes(15.5), Some(TimeBucket::UpTo30));
        assert_eq!(TimeBucket::from_minutes(90.0), Some(TimeBucket::UpTo90));
        assert_eq!(TimeBucket::from_minutes(-1.0), None);
        assert_eq!(TimeBucket::from_minutes(f64::NAN), None);
    }

    fn events() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("time", DataType::Int64),
            Field::new("event_type_label", DataType::Utf8),
            Field::new("is_goal", DataType::Int64),
        ]);
        let row = |t: i64, label: &str, goal: i64| {
            vec![Value::Int64(t), Value::Utf8(label.to_string()), Value::Int64(goal)]
        };
        DataSet::new(
            schema,
            vec![
                row(10, "Attempt", 1),
                row(12, "Foul", 0),
                row(44, "Attempt", 0),
                row(93, "Attempt", 1),
                row(94, "Attempt", 1),
            ],
        )
    }

    #[test]
    fn goals_per_bucket_are_ordered_and_zero_filled() {
        let t = time_analysis(&events()).unwrap();
        let goals: Vec<_> = t.goals_by_time_period.unwrap().iter().map(|(_, n)| n).collect();
        assert_eq!(goals, vec![1, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn events_crosstab_has_every_bucket() {
        let t = time_analysis(&events()).unwrap();
        let tab = t.events_by_time_period.unwrap();
        assert_eq!(tab.row_keys().len(), 7);
        assert_eq!(tab.get("0-15min", "Attempt"), 1);
        assert_eq!(tab.get("0-15min", "Foul"), 1);
        assert_eq!(tab.get("90+min", "Attempt"), 2);
        assert_eq!(tab.get("45-60min", "Attempt"), 0);
    }

    #[test]
    fn no_time_column_yields_none() {
        let ds = DataSet::new(Schema::new(vec![Field::new("is_goal", DataType::Int64)]), vec![]);
        assert!(time_analysis(&ds).is_none());
    }
}
