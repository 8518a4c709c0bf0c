use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::timeout::TimeoutLayer;

use crate::gateway::Gateway;
use crate::handlers;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    /// Model used when a chat request does not name one.
    pub default_model: String,
}

pub fn build_app(state: AppState, request_timeout_secs: u64) -> Router {
    let api_v1 = Router::new()
        .route("/chat", post(handlers::v1::chat))
        .route("/models", get(handlers::v1::list_models));

    Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .route("/version", get(handlers::version))
        .route("/api/chat", post(handlers::v1::chat))
        .nest("/api/v1", api_v1)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
}
