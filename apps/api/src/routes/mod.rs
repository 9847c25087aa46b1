pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pipeline A: model-backed optimize
        .route("/api/v1/optimize", post(handlers::handle_optimize))
        // Pipeline B: deterministic, model-free
        .route(
            "/api/v1/optimize/local",
            post(handlers::handle_optimize_local),
        )
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .with_state(state)
}
