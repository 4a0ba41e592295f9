//! Common error type and result alias.
//!
//! Client mistakes (`InvalidInput`, `PayloadTooLarge`) map to 4xx responses;
//! anything that went wrong while talking to the image-edit provider maps to
//! 502 with the upstream's message surfaced where available.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("processed image is too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("upstream request failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("{0}")]
    Upstream(String),
    #[error("invalid response from image-edit API: {0}")]
    UpstreamInvalidResponse(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::ImageDecode(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::HttpClient(_)
            | AppError::Upstream(_)
            | AppError::UpstreamInvalidResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_and_upstream_errors_map_to_expected_statuses() {
        assert_eq!(
            AppError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PayloadTooLarge { size: 5, max: 4 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Upstream("boom".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::UpstreamInvalidResponse("no url".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
