//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Ingest a CSV file into an in-memory [`DataSet`] using a known schema.
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> AnalysisResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> AnalysisResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(AnalysisError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Ingest a CSV file without a schema, inferring one column type per header.
///
/// See [`infer_schema`] for the inference rules.
pub fn ingest_csv_inferred_from_path(path: impl AsRef<Path>) -> AnalysisResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_inferred_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing reader, inferring the schema from the data.
pub fn ingest_csv_inferred_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> AnalysisResult<DataSet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;

    let schema = infer_schema(&headers, &records);
    let mut rows = Vec::with_capacity(records.len());
    for (row_idx0, record) in records.iter().enumerate() {
        let user_row = row_idx0 + 2;
        let mut row = Vec::with_capacity(schema.fields.len());
        for (idx, field) in schema.fields.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

/// Infer a [`Schema`] from CSV headers and records.
///
/// A column is `Int64` if every non-empty cell parses as an integer, otherwise `Float64` if every
/// non-empty cell parses as a float (this covers `nan` cells), otherwise `Bool` if every
/// non-empty cell is a boolean literal, otherwise `Utf8`. Columns with no non-empty cells are
/// `Float64`, so numeric fill values stay numeric.
pub fn infer_schema(headers: &[String], records: &[csv::StringRecord]) -> Schema {
    let fields = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells = records
                .iter()
                .map(|r| r.get(idx).unwrap_or("").trim())
                .filter(|s| !s.is_empty());
            Field::new(name.trim(), infer_column_type(cells))
        })
        .collect();
    Schema::new(fields)
}

fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> DataType {
    let mut any = false;
    let (mut int, mut float, mut boolean) = (true, true, true);
    for cell in cells {
        any = true;
        int &= cell.parse::<i64>().is_ok();
        float &= cell.parse::<f64>().is_ok();
        boolean &= parse_bool(cell).is_ok();
        if !(int || float || boolean) {
            break;
        }
    }

    match (any, int, float, boolean) {
        (false, ..) => DataType::Float64,
        (true, true, _, _) => DataType::Int64,
        (true, false, true, _) => DataType::Float64,
        (true, false, false, true) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> AnalysisResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| AnalysisError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => match trimmed.parse::<f64>() {
            Ok(v) if v.is_nan() => Ok(Value::Null),
            Ok(v) => Ok(Value::Float64(v)),
            Err(e) => Err(parse_error(e.to_string())),
        },
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_error),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" => Ok(true),
        "false" | "f" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/yes/no)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{infer_column_type, parse_typed_value};
    use crate::types::{DataType, Value};

    #[test]
    fn infers_int_float_bool_and_text() {
        assert_eq!(infer_column_type(["1", "2", "30"].into_iter()), DataType::Int64);
        assert_eq!(infer_column_type(["1", "2.5"].into_iter()), DataType::Float64);
        assert_eq!(infer_column_type(["1.0", "nan"].into_iter()), DataType::Float64);
        assert_eq!(infer_column_type(["true", "no"].into_iter()), DataType::Bool);
        assert_eq!(infer_column_type(["Arsenal", "1"].into_iter()), DataType::Utf8);
        assert_eq!(infer_column_type(std::iter::empty()), DataType::Float64);
    }

    #[test]
    fn nan_cells_load_as_null() {
        let v = parse_typed_value(2, "location", DataType::Float64, "NaN").unwrap();
        assert_eq!(v, Value::Null);
    }

    #[test]
    fn parse_error_carries_row_and_column() {
        let err = parse_typed_value(7, "time", DataType::Int64, "x").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 7"));
        assert!(msg.contains("column 'time'"));
    }
}
