mod config;
mod constants;
mod model;
mod routes;
mod services;
mod storage;

use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use config::AppConfig;
use constants::MAX_UPLOAD_SIZE;
use model::{Model, ModelWrapper};

/// Shared per-process state, built once at startup and injected into every
/// handler. The model is behind the `Model` trait so tests can swap in a
/// stub collaborator.
pub struct AppState<M: Model> {
    pub config: AppConfig,
    pub model: M,
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    let model = ModelWrapper::new(&config);

    println!(
        "[api] Model backend: {} {}",
        config.model_command,
        config.model_args.join(" ")
    );
    println!("[api] Upload root: {:?}", config.upload_dir);

    let state = Arc::new(AppState { config, model });

    let app = routes::build_routes()
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", addr, e));

    println!(
        "[api] Serving model '{}' ({})",
        state.config.metadata.name, state.config.metadata.id
    );
    println!("[api] Listening on http://{}", addr);
    axum::serve(listener, app).await.expect("Server failed");
}
