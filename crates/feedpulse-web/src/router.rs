//! Axum router, mapping URL paths to handlers.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use std::sync::Arc;
use crate::config::ServerConfig;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    feedback::{create_feedback, list_categories, list_feedback, feedback_stats},
    pages::{index_page, submit_form},
    system::health,
};
use crate::sse::sse_handler;

/// CORS for the configured frontend origin; permissive if it does not parse.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(frontend_url, "Invalid frontend URL, allowing any origin");
            CorsLayer::permissive()
        }
    }
}

/// Build and return the full Axum router.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",         get(index_page))
        .route("/feedback", post(submit_form))

        // Health
        .route("/health",   get(health))

        // SSE streaming
        .route("/api/events", get(sse_handler))

        // API endpoints
        .route("/api/feedback",       get(list_feedback).post(create_feedback))
        .route("/api/feedback/stats", get(feedback_stats))
        .route("/api/categories",     get(list_categories))

        // Middleware
        .layer(cors_layer(&server.frontend_url))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
