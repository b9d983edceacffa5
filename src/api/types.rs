//! Refund API request and response types.
//!
//! These types model the JSON exchanged with `POST /refunds`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request type understood by the refunds backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundRequestType {
    Cancellation,
    Refund,
    PartialRefund,
}

/// Reason code understood by the refunds backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundReason {
    Emergency,
    PropertyIssue,
    HostIssue,
    ChangeOfPlans,
    Other,
}

/// Body of `POST /refunds`.
///
/// Built once from a form draft and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    /// The guest's booking identifier.
    pub booking_reference: String,
    pub request_type: RefundRequestType,
    pub reason: RefundReason,
    pub name: String,
    pub email: String,
    /// Free-text details, may be empty.
    pub description: String,
}

/// Outcome reported by the refunds backend for a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RefundResponse {
    /// True only when the body carried `"success": true`.
    pub success: bool,
    /// Server-provided message, if any.
    pub message: Option<String>,
}

impl RefundResponse {
    /// A response acknowledging the request.
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A 2xx response that nevertheless declined the request.
    pub fn declined(message: Option<String>) -> Self {
        Self {
            success: false,
            message,
        }
    }

    /// Interpret a response body.
    ///
    /// Anything other than an object with a boolean `success: true` counts as
    /// a declined request.
    pub fn from_body(body: &Value) -> Self {
        Self {
            success: body.get("success").and_then(Value::as_bool) == Some(true),
            message: message_from_body(body),
        }
    }
}

/// Pull a human-readable message out of a JSON response body.
///
/// Prefers `message`, then `error`, ignoring blank strings.
pub fn message_from_body(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
