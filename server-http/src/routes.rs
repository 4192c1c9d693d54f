use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;

/// Build and configure the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Cached demo routes
        .route("/tests", get(handlers::get_by_status))
        .route("/tests/{uuid}", get(handlers::get_by_uuid))
        // Middleware
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
