//! Route registration and the top-level router.

pub mod feedback;
pub mod health;
pub mod query;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_api_key;
use super::state::AppState;

/// Builds the full application router: open health endpoint, key-protected
/// query and feedback endpoints, CORS, and request tracing.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(query::routes())
        .merge(feedback::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.allowed_origin))
        .with_state(state)
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!(
                origin = allowed_origin,
                "invalid allowed origin, CORS will reject cross-origin requests"
            );
            CorsLayer::new().allow_methods(Any).allow_headers(Any)
        }
    }
}
