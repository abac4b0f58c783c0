//! API key middleware.
//!
//! Applied to the protected sub-router only; health stays open.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::error::ApiError;
use super::state::AppState;

/// Rejects requests whose `X-API-Key` header does not match the configured
/// key. A missing or non-UTF-8 header is the same as a wrong one.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if key == state.config.api_key => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized),
    }
}
