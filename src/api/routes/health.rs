//! Health endpoint, reachable without an API key.

use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::envelope::ApiResponse;
use crate::api::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[derive(Debug, Serialize, Deserialize)]
struct HealthStatus {
    status: String,
    service_initialized: bool,
    indexed_sections: usize,
}

async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let started = Instant::now();

    let count = state.engine.section_count().await;
    let health = HealthStatus {
        status: "healthy".to_string(),
        service_initialized: count.is_ok(),
        indexed_sections: count.unwrap_or(0),
    };

    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    Json(ApiResponse::success(health, latency_ms))
}
