//! Response envelope types.
//!
//! Every endpoint replies with `{"success": bool, ...}`: `success: true`
//! carries a `data` field, `success: false` carries `message` and
//! `statusCode`. [`ErrorBody`] is the only error shape ever serialized to a
//! client; it is derived deterministically by [`crate::error::normalize`].

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Successful response: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Normalized error response: `{"success": false, "message", "statusCode"}`
/// plus an optional machine-readable `errorCode` and, outside production, a
/// `debug` block. In production the `debug` key is absent entirely, never
/// merely emptied.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<ErrorDebug>,
}

/// Diagnostic payload attached to error responses outside production.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDebug {
    /// Store-specific short code, when the failure came from the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Context fields reported by the store (implicated table, constraint,
    /// columns).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
    /// Raw diagnostic text from the underlying failure.
    pub original_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_fields: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = ApiSuccess::new(vec![1, 2, 3]);
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["success"], serde_json::json!(true));
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_error_envelope_uses_camel_case_keys() {
        let body = ErrorBody {
            success: false,
            message: "Record not found".to_string(),
            status_code: 404,
            error_code: Some("DATABASE_ERROR".to_string()),
            debug: None,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["success"], serde_json::json!(false));
        assert_eq!(json["statusCode"], serde_json::json!(404));
        assert_eq!(json["errorCode"], serde_json::json!("DATABASE_ERROR"));
        assert!(json.get("status_code").is_none());
    }
}
