//! Route configuration and setup

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health::health_check, not_found, upload_event::handle_upload_event};
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Storage notifications are small JSON documents
const MAX_EVENT_BODY_BYTES: usize = 256 * 1024;
const MAX_CONCURRENT_REQUESTS: usize = 64;

pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handle_upload_event))
        .route("/events/storage", post(handle_upload_event))
        .route("/health", get(health_check))
        .fallback(not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(DefaultBodyLimit::max(MAX_EVENT_BODY_BYTES))
}
