//! HTTP error type and its envelope rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use super::envelope::ApiResponse;
use crate::types::PipelineError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid API key")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Embedding(msg) | PipelineError::Generation(msg) => {
                ApiError::ServiceUnavailable(msg)
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::<Value>::error(self.to_string(), "401", self.to_string()),
            ),
            ApiError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::<Value>::error(self.to_string(), "400", self.to_string()),
            ),
            ApiError::ServiceUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiResponse::<Value>::error(self.to_string(), "503", self.to_string()),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<Value>::error(
                        "Internal Server Error",
                        "INTERNAL_ERROR",
                        detail.clone(),
                    ),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_provider_failures_map_to_service_unavailable() {
        let err: ApiError = PipelineError::Embedding("provider down".to_string()).into();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));

        let err: ApiError = PipelineError::Generation("model offline".to_string()).into();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn storage_failures_map_to_internal() {
        let err: ApiError = PipelineError::Storage("disk gone".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
