pub mod model;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::AppState;
use crate::model::Model;

/// Build all routes for the API
pub fn build_routes<M: Model>() -> Router<Arc<AppState<M>>> {
    Router::new()
        .route("/health", get(health))
        .merge(model::routes())
}

async fn health() -> &'static str {
    "ok"
}
