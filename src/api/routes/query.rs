//! The query endpoint.

use std::time::Instant;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::api::envelope::ApiResponse;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::types::Output;

/// Longest accepted query, in characters.
const MAX_QUERY_CHARS: usize = 1000;

/// Accepted retrieval depth overrides.
const K_RANGE: std::ops::RangeInclusive<usize> = 1..=20;

pub fn routes() -> Router<AppState> {
    Router::new().route("/query", post(query_laws))
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    query: String,
    /// Optional retrieval depth for this request only.
    k: Option<usize>,
}

async fn query_laws(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<ApiResponse<Output>>, ApiError> {
    let started = Instant::now();

    if request.query.chars().count() > MAX_QUERY_CHARS {
        return Err(ApiError::BadRequest(
            "Query too long (max 1000 characters)".to_string(),
        ));
    }
    if let Some(k) = request.k {
        if !K_RANGE.contains(&k) {
            return Err(ApiError::BadRequest(
                "k must be between 1 and 20".to_string(),
            ));
        }
    }

    let output = match request.k {
        Some(k) => state.engine.answer_with_top_k(&request.query, k).await?,
        None => state.engine.answer(&request.query).await?,
    };

    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    Ok(Json(ApiResponse::success(output, latency_ms)))
}
