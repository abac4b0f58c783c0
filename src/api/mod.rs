//! HTTP surface: envelope, auth, and the three endpoints.
//!
//! ```text
//! POST /query     X-API-Key   question in, cited answer out
//! POST /feedback  X-API-Key   records client feedback
//! GET  /health    open        liveness and index size
//! ```
//!
//! Every response uses the [`envelope::ApiResponse`] shape.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
