// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flattened projection of a hub response.

use crate::error::AppError;
use crate::models::UserId;
use serde::Serialize;
use serde_json::Value;

/// Placeholder written for any response field the hub left out.
pub const MISSING_FIELD_SENTINEL: &str = "None";

/// One user's response for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub id: UserId,
    pub status_code: Value,
    pub data: Value,
    pub pagination: Value,
    pub message: Value,
}

impl FetchResult {
    /// Project a hub response body.
    ///
    /// Absent keys become [`MISSING_FIELD_SENTINEL`]; an explicit `null`
    /// is kept. Bodies that are not JSON objects are rejected.
    pub fn from_response(id: UserId, body: &Value) -> Result<Self, AppError> {
        let object = body.as_object().ok_or_else(|| {
            AppError::InvalidResponse(format!("expected a JSON object, got {}", kind_of(body)))
        })?;

        let field = |key: &str| {
            object
                .get(key)
                .cloned()
                .unwrap_or_else(|| Value::String(MISSING_FIELD_SENTINEL.to_string()))
        };

        Ok(Self {
            id,
            status_code: field("statusCode"),
            data: field("data"),
            pagination: field("pagination"),
            message: field("message"),
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_response() {
        let body = json!({
            "statusCode": 200,
            "data": [{"bpm": 61}],
            "pagination": {"page": 1},
            "message": "ok",
            "extra": true
        });
        let result = FetchResult::from_response(UserId::Int(1), &body).unwrap();

        assert_eq!(result.status_code, json!(200));
        assert_eq!(result.data, json!([{"bpm": 61}]));
        assert_eq!(result.pagination, json!({"page": 1}));
        assert_eq!(result.message, json!("ok"));
    }

    #[test]
    fn test_missing_fields_get_sentinel() {
        let result = FetchResult::from_response(UserId::Int(1), &json!({"message": "x"})).unwrap();

        assert_eq!(result.status_code, json!("None"));
        assert_eq!(result.data, json!("None"));
        assert_eq!(result.pagination, json!("None"));
        assert_eq!(result.message, json!("x"));
    }

    #[test]
    fn test_explicit_null_is_kept() {
        let result = FetchResult::from_response(UserId::Int(1), &json!({"data": null})).unwrap();
        assert_eq!(result.data, Value::Null);
    }

    #[test]
    fn test_non_object_rejected() {
        let err = FetchResult::from_response(UserId::Int(1), &json!([1, 2])).unwrap_err();
        assert!(err.is_per_user());
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = FetchResult::from_response(UserId::Int(3), &json!({})).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["statusCode"], json!("None"));
        assert_eq!(value["id"], json!(3));
    }
}
