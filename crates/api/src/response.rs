//! Uniform response envelope.
//!
//! Every JSON payload the service emits, success or failure, uses the same
//! outer shape: `{ success, message, timestamp, data?, meta? }`. The `data`
//! and `meta` keys are omitted entirely when absent, never null.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    /// RFC 3339 timestamp of envelope creation.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: now_rfc3339(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn ok_with_meta(message: impl Into<String>, data: T, meta: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: now_rfc3339(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<Value> {
    /// Failure envelope. `detail` is attached under `data.error` and must
    /// only be supplied in development environments.
    pub fn failure(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            timestamp: now_rfc3339(),
            data: detail.map(|d| json!({ "error": d })),
            meta: None,
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::ok("Dashboard data retrieved", json!({"leads": 10}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Dashboard data retrieved");
        assert_eq!(value["data"]["leads"], 10);
        assert!(value.get("meta").is_none());
        // Timestamp parses back as RFC 3339.
        let ts = value["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn test_meta_included_when_present() {
        let response =
            ApiResponse::ok_with_meta("ok", json!([]), json!({"date_from": "2025-01-01"}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["meta"]["date_from"], "2025-01-01");
    }

    #[test]
    fn test_failure_envelope_omits_data_without_detail() {
        let response = ApiResponse::failure("Failed to fetch dashboard data", None);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn test_failure_envelope_carries_detail_under_error() {
        let response = ApiResponse::failure(
            "Failed to fetch dashboard data",
            Some("connection refused".to_string()),
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"]["error"], "connection refused");
    }
}
