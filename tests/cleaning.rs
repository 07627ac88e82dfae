use std::collections::HashSet;
use std::path::PathBuf;

use match_event_analysis::ingestion::{load_data_csv, LoadOptions};
use match_event_analysis::pipeline::{PipelineOptions, EVENT_COLUMNS, REQUIRED_COLUMNS};
use match_event_analysis::processing::{
    clean_data, decode_categorical_data, filter_columns, CategoryColumn,
};
use match_event_analysis::types::{DataSet, RowKey, Value};

fn raw_events() -> DataSet {
    let opts = LoadOptions {
        raw_data_dir: PathBuf::from("tests").join("fixtures"),
        ..Default::default()
    };
    load_data_csv("events.csv", &opts).unwrap()
}

fn cleaned_events() -> DataSet {
    let raw = raw_events();
    let projected = filter_columns(&raw, &EVENT_COLUMNS);
    let defaults = PipelineOptions::default();
    clean_data(&projected, Some(&defaults.fill_rules), Some(&REQUIRED_COLUMNS))
}

#[test]
fn filter_columns_keeps_requested_and_present() {
    let raw = raw_events();
    let out = filter_columns(&raw, &["player", "not_a_column", "time", "player"]);
    assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["player", "time"]);
    assert_eq!(out.row_count(), raw.row_count());

    let projected = filter_columns(&raw, &EVENT_COLUMNS);
    assert_eq!(projected.column_count(), EVENT_COLUMNS.len());
    assert!(!projected.schema.contains("text"));
}

#[test]
fn cleaning_drops_duplicates_and_rows_missing_required_fields() {
    let events = cleaned_events();
    // one duplicate row and one event without a time
    assert_eq!(events.row_count(), 10);

    let distinct: HashSet<RowKey<'_>> = events.rows.iter().map(|r| RowKey(r)).collect();
    assert_eq!(distinct.len(), events.row_count());

    for name in REQUIRED_COLUMNS {
        let idx = events.schema.index_of(name).unwrap();
        assert!(events.rows.iter().all(|r| !r[idx].is_null()), "null left in {name}");
    }

    // shot fields on non-shot events are filled, not dropped
    let location = events.schema.index_of("location").unwrap();
    assert!(events.rows.iter().all(|r| !r[location].is_null()));
}

#[test]
fn whole_row_policy_drops_events_with_any_blank() {
    let projected = filter_columns(&raw_events(), &EVENT_COLUMNS);
    let out = clean_data(&projected, None, None);
    // only shots carry every column
    assert_eq!(out.row_count(), 5);
    assert!(out.rows.iter().all(|r| r.iter().all(|v| !v.is_null())));
}

#[test]
fn decoding_is_idempotent_and_unknown_codes_are_null() {
    let events = cleaned_events();
    let once = decode_categorical_data(&events);
    let twice = decode_categorical_data(&once);
    assert_eq!(once, twice);

    for column in CategoryColumn::ALL {
        assert!(once.schema.contains(column.label_name()));
    }

    // location was filled with 0 on non-shot events; 0 is not a location code
    let location = once.schema.index_of("location_label").unwrap();
    let event_type = once.schema.index_of("event_type_label").unwrap();
    for row in &once.rows {
        if row[event_type] != Value::Utf8("Attempt".to_string()) {
            assert_eq!(row[location], Value::Null);
        }
    }
    assert_eq!(once.rows[0][event_type], Value::Utf8("Attempt".to_string()));
    assert_eq!(once.rows[0][location], Value::Utf8("Outside the box".to_string()));
}
