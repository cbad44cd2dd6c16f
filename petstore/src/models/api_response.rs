//! Generic operation status payload.

use serde::{Deserialize, Serialize};

/// Status payload returned by operations like `uploadFile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Numeric status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,

    /// Message category, `unknown` in practice.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
