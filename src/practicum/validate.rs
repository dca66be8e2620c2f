use serde_json::Value;

use super::error::SchemaError;
use super::types::{StatusesResponse, json_type_name};

/// Check that a decoded body matches the documented response shape.
///
/// The body must be an object with an array under `homeworks`. An integer
/// `current_date` is picked up when present; any other type there is an
/// error as well.
pub fn validate_response(body: Value) -> Result<StatusesResponse, SchemaError> {
    let mut map = match body {
        Value::Object(map) => map,
        other => {
            return Err(SchemaError::NotAnObject {
                found: json_type_name(&other),
            });
        }
    };

    let homeworks = match map.remove("homeworks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(SchemaError::WrongType {
                key: "homeworks",
                expected: "an array",
                found: json_type_name(&other),
            });
        }
        None => return Err(SchemaError::MissingKey("homeworks")),
    };

    let current_date = match map.get("current_date") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_i64().ok_or(SchemaError::WrongType {
            key: "current_date",
            expected: "an integer timestamp",
            found: json_type_name(value),
        })?),
    };

    Ok(StatusesResponse {
        homeworks,
        current_date,
    })
}
