//! Response schema validation
//!
//! The canonical response is a JSON array of positional records:
//! `[category, line_number, occurrence_count, message, source_line]`.
//! The array may also arrive wrapped as `{"result": [...]}` or as
//! `{"result": "<JSON text of the array>"}`. Everything else is rejected.

use crate::error::FetchError;
use crate::types::{ViolationList, ViolationRecord};
use serde_json::Value;

const RECORD_FIELDS: usize = 5;

pub fn decode_response(body: &str) -> Result<ViolationList, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("invalid JSON: {}", e)))?;
    decode_value(value)
}

fn decode_value(value: Value) -> Result<ViolationList, FetchError> {
    match value {
        Value::Array(records) => decode_records(records),
        Value::Object(mut map) => match map.remove("result") {
            Some(Value::Array(records)) => decode_records(records),
            Some(Value::String(text)) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(records)) => decode_records(records),
                _ => Err(FetchError::malformed(
                    "'result' string does not hold a JSON array of records",
                )),
            },
            Some(other) => Err(FetchError::malformed(format!(
                "'result' must be an array, found {}",
                type_name(&other)
            ))),
            None => Err(FetchError::malformed("object without a 'result' field")),
        },
        other => Err(FetchError::malformed(format!(
            "expected an array of records, found {}",
            type_name(&other)
        ))),
    }
}

fn decode_records(records: Vec<Value>) -> Result<ViolationList, FetchError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| decode_record(i, record))
        .collect()
}

fn decode_record(index: usize, record: Value) -> Result<ViolationRecord, FetchError> {
    let Value::Array(fields) = record else {
        return Err(FetchError::malformed(format!(
            "record {}: expected an array, found {}",
            index,
            type_name(&record)
        )));
    };
    if fields.len() != RECORD_FIELDS {
        return Err(FetchError::malformed(format!(
            "record {}: expected {} fields, found {}",
            index,
            RECORD_FIELDS,
            fields.len()
        )));
    }

    Ok(ViolationRecord::new(
        string_field(index, "category", &fields[0])?,
        uint_field(index, "line number", &fields[1])?,
        uint_field(index, "occurrence count", &fields[2])?,
        string_field(index, "message", &fields[3])?,
        string_field(index, "source line", &fields[4])?,
    ))
}

fn string_field(index: usize, name: &str, value: &Value) -> Result<String, FetchError> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        FetchError::malformed(format!(
            "record {}: {} must be a string, found {}",
            index,
            name,
            type_name(value)
        ))
    })
}

fn uint_field(index: usize, name: &str, value: &Value) -> Result<u32, FetchError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            FetchError::malformed(format!(
                "record {}: {} must be a non-negative integer, found {}",
                index, name, value
            ))
        })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
