//! Router construction and shared application state.
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::openai::client::OpenAiImageClient;

/// Ceiling on the incoming request body, matching the upload limit the
/// original form enforces.
pub const MAX_REQUEST_BYTES: usize = 5 * 1024 * 1024;

pub struct AppState {
    pub openai_client: OpenAiImageClient,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/image/transformations", get(handlers::list_transformations))
        .route("/image/transform", post(handlers::transform_image))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
