//! JSON record envelope to `DataFrame`.

use polars::prelude::*;
use serde_json::{Map, Value};

use crate::error::EntsogError;
use crate::raw::RequestError;

/// Name of the provenance column appended to every result.
pub(crate) const URL_COLUMN: &str = "url";

/// Pulls the record array out of the response envelope.
///
/// The envelope is a JSON object with two top-level keys: metadata first,
/// records second. The second position is what matters, not the key name.
/// Nested objects are flattened into dotted paths. An empty record array is
/// the platform's other way of saying it has nothing for the filters.
pub(crate) fn extract_records(body: &str) -> Result<Vec<Map<String, Value>>, EntsogError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| EntsogError::Payload(format!("invalid JSON: {e}")))?;
    let Value::Object(envelope) = value else {
        return Err(EntsogError::Payload("expected a JSON object envelope".into()));
    };
    let Some(records) = envelope.values().nth(1) else {
        return Err(EntsogError::Payload(
            "envelope carries fewer than two top-level keys".into(),
        ));
    };
    let Value::Array(items) = records else {
        return Err(EntsogError::Payload(
            "second envelope key does not hold a record array".into(),
        ));
    };
    if items.is_empty() {
        return Err(EntsogError::Request(RequestError::NoMatchingData));
    }
    items
        .iter()
        .map(|item| match item {
            Value::Object(record) => Ok(flatten(record)),
            other => Err(EntsogError::Payload(format!(
                "record is not an object: {other}"
            ))),
        })
        .collect()
}

fn flatten(record: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into(&mut flat, None, record);
    flat
}

fn flatten_into(flat: &mut Map<String, Value>, prefix: Option<&str>, record: &Map<String, Value>) {
    for (key, value) in record {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(flat, Some(&path), nested),
            other => {
                flat.insert(path, other.clone());
            }
        }
    }
}

/// Builds a `DataFrame` from flattened records.
///
/// Column order is first-seen order across records; records missing a key
/// contribute a null. Dtypes are inferred per column: all-numeric becomes
/// f64, all-bool becomes bool, anything else is stringified.
pub(crate) fn records_to_frame(records: &[Map<String, Value>]) -> PolarsResult<DataFrame> {
    let mut names: Vec<&String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !names.contains(&key) {
                names.push(key);
            }
        }
    }

    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let cells: Vec<Option<&Value>> = records
            .iter()
            .map(|record| record.get(name).filter(|v| !v.is_null()))
            .collect();
        columns.push(infer_column(name, &cells));
    }
    DataFrame::new(columns)
}

fn infer_column(name: &str, cells: &[Option<&Value>]) -> Column {
    if cells.iter().flatten().all(|v| v.is_number()) {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| cell.and_then(|v| v.as_f64()))
            .collect();
        return Column::new(name.into(), values);
    }
    if cells.iter().flatten().all(|v| v.is_boolean()) {
        let values: Vec<Option<bool>> = cells
            .iter()
            .map(|cell| cell.and_then(|v| v.as_bool()))
            .collect();
        return Column::new(name.into(), values);
    }
    let values: Vec<Option<String>> = cells
        .iter()
        .map(|cell| {
            cell.map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })
        .collect();
    Column::new(name.into(), values)
}

/// Renames every column to its snake_case form.
pub(crate) fn snake_case_columns(mut frame: DataFrame) -> PolarsResult<DataFrame> {
    let renames: Vec<(String, String)> = frame
        .get_column_names()
        .iter()
        .map(|name| (name.to_string(), super::to_snake_case(name.as_str())))
        .collect();
    for (old, new) in renames {
        if old != new {
            frame.rename(&old, new.into())?;
        }
    }
    Ok(frame)
}

/// Appends the effective request URL as a provenance column.
pub(crate) fn with_url(mut frame: DataFrame, url: &str) -> PolarsResult<DataFrame> {
    let height = frame.height();
    frame.with_column(Column::new(URL_COLUMN.into(), vec![url; height]))?;
    Ok(frame)
}

/// Concatenates frames in the given order, aligning columns diagonally, and
/// optionally drops duplicate rows.
///
/// Deduplication compares every column except the provenance URL, which
/// legitimately differs between the chunked calls that produced overlapping
/// boundary rows.
pub(crate) fn merge_frames(frames: Vec<DataFrame>, dedup: bool) -> Result<DataFrame, EntsogError> {
    let lazy: Vec<LazyFrame> = frames.into_iter().map(|f| f.lazy()).collect();
    let merged = concat_lf_diagonal(&lazy, UnionArgs::default())?.collect()?;
    if !dedup {
        return Ok(merged);
    }
    let subset: Vec<String> = merged
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() != URL_COLUMN)
        .map(|name| name.to_string())
        .collect();
    if subset.is_empty() {
        return Ok(merged);
    }
    Ok(merged.unique_stable(Some(&subset), UniqueKeepStrategy::First, None)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"{
        "meta": {"count": 2},
        "operationaldatas": [
            {"operatorKey": "BE-TSO-0001", "value": 100.5, "flowStatus": {"id": "Confirmed"}},
            {"operatorKey": "NL-TSO-0001", "value": 7, "isCrossBorder": true}
        ]
    }"#;

    #[test]
    fn takes_the_second_envelope_key_positionally() {
        let records = extract_records(ENVELOPE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["operatorKey"], "BE-TSO-0001");
    }

    #[test]
    fn flattens_nested_objects_into_dotted_paths() {
        let records = extract_records(ENVELOPE).unwrap();
        assert_eq!(records[0]["flowStatus.id"], "Confirmed");
    }

    #[test]
    fn empty_record_array_is_no_matching_data() {
        let err = extract_records(r#"{"meta": {}, "rows": []}"#).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn truncated_envelope_is_a_payload_error() {
        let err = extract_records(r#"{"meta": {}}"#).unwrap_err();
        assert!(matches!(err, EntsogError::Payload(_)));
    }

    #[test]
    fn infers_dtypes_and_keeps_first_seen_column_order() {
        let records = extract_records(ENVELOPE).unwrap();
        let frame = records_to_frame(&records).unwrap();
        assert_eq!(
            frame.get_column_names()[0].as_str(),
            "operatorKey"
        );
        assert_eq!(frame.column("value").unwrap().dtype(), &DataType::Float64);
        assert_eq!(
            frame.column("isCrossBorder").unwrap().dtype(),
            &DataType::Boolean
        );
        assert_eq!(frame.column("isCrossBorder").unwrap().null_count(), 1);
    }

    #[test]
    fn merge_dedups_ignoring_the_url_column() {
        let records = extract_records(ENVELOPE).unwrap();
        let frame = records_to_frame(&records).unwrap();
        let first = with_url(frame.clone(), "https://a").unwrap();
        let second = with_url(frame, "https://b").unwrap();
        let merged = merge_frames(vec![first, second], true).unwrap();
        assert_eq!(merged.height(), 2);
    }

    #[test]
    fn merge_without_dedup_keeps_every_row() {
        let records = extract_records(ENVELOPE).unwrap();
        let frame = records_to_frame(&records).unwrap();
        let merged = merge_frames(vec![frame.clone(), frame], false).unwrap();
        assert_eq!(merged.height(), 4);
    }
}
