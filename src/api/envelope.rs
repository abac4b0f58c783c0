//! Response envelope shared by every endpoint.
//!
//! All responses, success and error alike, carry the same shape: a status,
//! a human message, optional payload, metadata, and optional error details.
//! Clients can branch on `status` without inspecting HTTP codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a response carries data or errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Success,
    Error,
}

/// Per-response metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub timestamp: DateTime<Utc>,
    pub latency_ms: f64,
    pub api_version: String,
}

impl ResponseMeta {
    pub fn new(latency_ms: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            latency_ms,
            api_version: "1.0".to_string(),
        }
    }
}

/// One error entry in an error envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub detail: String,
}

/// The envelope itself, generic over the success payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ServiceStatus,
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<ResponseMeta>,
    pub errors: Option<Vec<ErrorDetail>>,
}

impl<T> ApiResponse<T> {
    /// Success envelope wrapping `data`.
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            status: ServiceStatus::Success,
            message: "Success".to_string(),
            data: Some(data),
            meta: Some(ResponseMeta::new(latency_ms)),
            errors: None,
        }
    }

    /// Error envelope. `message` is the headline; `detail` lands in the
    /// error list under `code`.
    pub fn error(
        message: impl Into<String>,
        code: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status: ServiceStatus::Error,
            message: message.into(),
            data: None,
            meta: Some(ResponseMeta::new(0.0)),
            errors: Some(vec![ErrorDetail {
                code: code.into(),
                detail: detail.into(),
            }]),
        }
    }
}
