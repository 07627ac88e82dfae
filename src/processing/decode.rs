//! Decoding integer category codes into human-readable labels.
//!
//! The seven lookup tables are process-wide constants. [`decode_categorical_data`] appends one
//! `<column>_label` column per raw code column present in the input.

use crate::types::{DataSet, DataType, Field, Value};

/// Event type codes.
pub static EVENT_TYPES: &[(i64, &str)] = &[
    (0, "Announcement"),
    (1, "Attempt"),
    (2, "Corner"),
    (3, "Foul"),
    (4, "Yellow card"),
    (5, "Second yellow card"),
    (6, "Red card"),
    (7, "Substitution"),
    (8, "Free kick won"),
    (9, "Offside"),
    (10, "Hand ball"),
    (11, "Penalty conceded"),
    (12, "Key Pass"),
    (13, "Failed through ball"),
    (14, "Sending off"),
    (15, "Own goal"),
];

/// Shot outcome codes.
pub static SHOT_OUTCOMES: &[(i64, &str)] = &[
    (1, "On target"),
    (2, "Off target"),
    (3, "Blocked"),
    (4, "Hit the bar"),
];

/// Pitch location codes.
pub static LOCATIONS: &[(i64, &str)] = &[
    (1, "Attacking half"),
    (2, "Defensive half"),
    (3, "Centre of the box"),
    (4, "Left wing"),
    (5, "Right wing"),
    (6, "Difficult angle and long range"),
    (7, "Difficult angle on the left"),
    (8, "Difficult angle on the right"),
    (9, "Left side of the box"),
    (10, "Left side of the six yard box"),
    (11, "Right side of the box"),
    (12, "Right side of the six yard box"),
    (13, "Very close range"),
    (14, "Penalty spot"),
    (15, "Outside the box"),
    (16, "Long range"),
    (17, "More than 35 yards"),
    (18, "More than 40 yards"),
];

/// Body part codes.
pub static BODY_PARTS: &[(i64, &str)] = &[(1, "right foot"), (2, "left foot"), (3, "head")];

/// Assist method codes.
pub static ASSIST_METHODS: &[(i64, &str)] = &[
    (0, "None"),
    (1, "Pass"),
    (2, "Cross"),
    (3, "Headed pass"),
    (4, "Through ball"),
];

/// Situation codes.
pub static SITUATIONS: &[(i64, &str)] = &[
    (1, "Open play"),
    (2, "Set piece"),
    (3, "Corner"),
    (4, "Free kick"),
];

/// Side codes.
pub static SIDES: &[(i64, &str)] = &[(1, "Home"), (2, "Away")];

/// The raw code columns that have a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    EventType,
    ShotOutcome,
    Location,
    BodyPart,
    AssistMethod,
    Situation,
    Side,
}

impl CategoryColumn {
    /// All decoded columns, in the order their label columns are appended.
    pub const ALL: [CategoryColumn; 7] = [
        CategoryColumn::EventType,
        CategoryColumn::ShotOutcome,
        CategoryColumn::Location,
        CategoryColumn::BodyPart,
        CategoryColumn::AssistMethod,
        CategoryColumn::Situation,
        CategoryColumn::Side,
    ];

    /// Name of the raw code column.
    pub fn raw_name(self) -> &'static str {
        match self {
            CategoryColumn::EventType => "event_type",
            CategoryColumn::ShotOutcome => "shot_outcome",
            CategoryColumn::Location => "location",
            CategoryColumn::BodyPart => "bodypart",
            CategoryColumn::AssistMethod => "assist_method",
            CategoryColumn::Situation => "situation",
            CategoryColumn::Side => "side",
        }
    }

    /// Name of the appended label column.
    pub fn label_name(self) -> &'static str {
        match self {
            CategoryColumn::EventType => "event_type_label",
            CategoryColumn::ShotOutcome => "shot_outcome_label",
            CategoryColumn::Location => "location_label",
            CategoryColumn::BodyPart => "bodypart_label",
            CategoryColumn::AssistMethod => "assist_method_label",
            CategoryColumn::Situation => "situation_label",
            CategoryColumn::Side => "side_label",
        }
    }

    pub fn table(self) -> &'static [(i64, &'static str)] {
        match self {
            CategoryColumn::EventType => EVENT_TYPES,
            CategoryColumn::ShotOutcome => SHOT_OUTCOMES,
            CategoryColumn::Location => LOCATIONS,
            CategoryColumn::BodyPart => BODY_PARTS,
            CategoryColumn::AssistMethod => ASSIST_METHODS,
            CategoryColumn::Situation => SITUATIONS,
            CategoryColumn::Side => SIDES,
        }
    }

    /// Label for `code`, or `None` if the code has no entry.
    pub fn lookup(self, code: i64) -> Option<&'static str> {
        self.table()
            .iter()
            .find_map(|&(c, label)| (c == code).then_some(label))
    }

    /// Decode a cell. Nulls, non-integral numbers, text and unknown codes decode to `Null`.
    pub fn decode(self, value: &Value) -> Value {
        match value {
            Value::Int64(_) | Value::Float64(_) => value
                .as_i64()
                .and_then(|code| self.lookup(code))
                .map_or(Value::Null, |label| Value::Utf8(label.to_owned())),
            _ => Value::Null,
        }
    }
}

/// Append a `<column>_label` column for every category column present in `dataset`.
///
/// Absent columns are skipped. Existing label columns are recomputed in place, so decoding an
/// already-decoded table yields identical label columns.
pub fn decode_categorical_data(dataset: &DataSet) -> DataSet {
    let columns = CategoryColumn::ALL
        .into_iter()
        .filter_map(|category| {
            let idx = dataset.schema.index_of(category.raw_name())?;
            let labels = dataset
                .rows
                .iter()
                .map(|row| row.get(idx).map_or(Value::Null, |v| category.decode(v)))
                .collect();
            Some((Field::new(category.label_name(), DataType::Utf8), labels))
        })
        .collect();
    dataset.with_columns(columns)
}

#[cfg(test)]
mod tests {
    use super::{decode_categorical_data, CategoryColumn};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn raw() -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("event_type", DataType::Int64),
                Field::new("location", DataType::Float64),
                Field::new("side", DataType::Int64),
            ]),
            vec![
                vec![Value::Int64(1), Value::Float64(3.0), Value::Int64(1)],
                vec![Value::Int64(99), Value::Null, Value::Int64(2)],
                vec![Value::Int64(6), Value::Float64(2.5), Value::Int64(0)],
            ],
        )
    }

    #[test]
    fn appends_label_columns_only_for_present_columns() {
        let out = decode_categorical_data(&raw());
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec![
                "event_type",
                "location",
                "side",
                "event_type_label",
                "location_label",
                "side_label"
            ]
        );
        assert_eq!(out.rows[0][3], Value::Utf8("Attempt".to_string()));
        assert_eq!(out.rows[0][4], Value::Utf8("Centre of the box".to_string()));
        assert_eq!(out.rows[0][5], Value::Utf8("Home".to_string()));
    }

    #[test]
    fn unknown_null_and_fractional_codes_decode_to_null() {
        let out = decode_categorical_data(&raw());
        assert_eq!(out.rows[1][3], Value::Null);
        assert_eq!(out.rows[1][4], Value::Null);
        assert_eq!(out.rows[2][4], Value::Null);
        assert_eq!(out.rows[2][5], Value::Null);
    }

    #[test]
    fn decoding_is_idempotent_and_pure() {
        let input = raw();
        let once = decode_categorical_data(&input);
        let twice = decode_categorical_data(&once);
        assert_eq!(once, twice);
        assert_eq!(input.column_count(), 3);
    }

    #[test]
    fn assist_code_zero_is_a_real_label() {
        assert_eq!(CategoryColumn::AssistMethod.lookup(0), Some("None"));
        assert_eq!(CategoryColumn::Situation.lookup(0), None);
    }
}
