//! Shared state handed to every route.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::engine::QueryEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(engine: Arc<QueryEngine>, config: Arc<AppConfig>) -> Self {
        Self { engine, config }
    }
}
