//! Feedback intake endpoint.

use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::envelope::ApiResponse;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::types::Output;

pub fn routes() -> Router<AppState> {
    Router::new().route("/feedback", post(submit_feedback))
}

#[derive(Debug, Serialize, Deserialize)]
struct FeedbackRequest {
    /// `"positive"` or `"negative"` when present.
    feedback: Option<String>,
    /// The answer the feedback refers to.
    result: Output,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FeedbackAck {
    received: bool,
}

async fn submit_feedback(
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<ApiResponse<FeedbackAck>>, ApiError> {
    if let Some(feedback) = request.feedback.as_deref() {
        if feedback != "positive" && feedback != "negative" {
            return Err(ApiError::BadRequest(
                "feedback must be 'positive' or 'negative'".to_string(),
            ));
        }
    }

    let payload =
        serde_json::to_string(&request).unwrap_or_else(|_| "<unserializable>".to_string());
    tracing::info!(%payload, "feedback received");

    Ok(Json(ApiResponse::success(FeedbackAck { received: true }, 0.0)))
}
