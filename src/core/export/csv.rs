//! CSV encoding for flattened records
//!
//! The encoder makes two passes: the first collects the union of keys
//! across all records in first-seen order, the second emits one row per
//! record with missing keys written as empty fields. Deriving the header
//! from the first record alone would silently drop columns whenever record
//! shapes diverge.

use crate::domain::Result;
use serde_json::{Map, Value};

/// Encode flattened records as CSV text
///
/// The header row holds the key union in first-seen order; quoting follows
/// standard CSV rules (fields containing comma, quote, or newline are
/// quoted with internal quotes doubled). An empty record slice yields an
/// empty string.
pub fn encode_csv(records: &[Map<String, Value>]) -> Result<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    // First pass: key union, first-seen order
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    // Second pass: header plus one row per record
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(*column).map(cell_text).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::domain::CustodianError::Serialization(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| crate::domain::CustodianError::Serialization(e.to_string()))
}

/// Render a flattened value as cell text
///
/// Strings pass through unquoted (the CSV layer adds quoting), null becomes
/// an empty field, and remaining scalars use their JSON text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_header_and_rows() {
        let records = vec![
            record(json!({"id": "a", "count": 1})),
            record(json!({"id": "b", "count": 2})),
        ];

        let csv_text = encode_csv(&records).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(lines, vec!["id,count", "a,1", "b,2"]);
    }

    #[test]
    fn test_key_union_covers_divergent_records() {
        let records = vec![
            record(json!({"id": "a", "x": 1})),
            record(json!({"id": "b", "y": 2})),
        ];

        let csv_text = encode_csv(&records).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(lines[0], "id,x,y");
        assert_eq!(lines[1], "a,1,");
        assert_eq!(lines[2], "b,,2");
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_escaped() {
        let records = vec![record(json!({
            "name": "Acme, Inc.",
            "note": "said \"hi\""
        }))];

        let csv_text = encode_csv(&records).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(lines[1], "\"Acme, Inc.\",\"said \"\"hi\"\"\"");
    }

    #[test]
    fn test_null_renders_as_empty_field() {
        let records = vec![record(json!({"id": "a", "gone": null}))];

        let csv_text = encode_csv(&records).unwrap();
        assert_eq!(csv_text.lines().nth(1).unwrap(), "a,");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(encode_csv(&[]).unwrap(), "");
    }

    #[test]
    fn test_booleans_and_numbers_use_json_text() {
        let records = vec![record(json!({"flag": true, "score": 3.5}))];

        let csv_text = encode_csv(&records).unwrap();
        assert_eq!(csv_text.lines().nth(1).unwrap(), "true,3.5");
    }
}
