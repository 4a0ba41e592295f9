//! Axum request handlers for the HTTP API.
use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::transform::{canvas, prompts};

pub async fn root() -> &'static str {
    "Photo Transform Proxy"
}

/// Static list of available transformations. The provider prompt text is not
/// part of the public payload.
pub async fn list_transformations() -> Json<Value> {
    Json(json!({ "transformations": prompts::TRANSFORMATIONS }))
}

fn is_accepted_mime(mime: &str) -> bool {
    matches!(mime, "image/png" | "image/jpeg" | "image/jpg")
}

/// Relay a transformation request to the image-edit provider.
///
/// Input validation happens before any image work or outbound traffic: an
/// unknown transformation or a rejected mime type never reaches the upstream.
pub async fn transform_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut mime_type: Option<String> = None;
    let mut transformation: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("image") => {
                mime_type = field.content_type().map(|m| m.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("failed to read image field: {}", e)))?;
                image_bytes = Some(bytes.to_vec());
            }
            Some("transformation") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("failed to read transformation field: {}", e)))?;
                transformation = Some(text);
            }
            _ => {}
        }
    }

    let image_bytes = image_bytes
        .ok_or_else(|| AppError::InvalidInput("no image file provided".to_string()))?;
    let transformation = transformation
        .ok_or_else(|| AppError::InvalidInput("no transformation specified".to_string()))?;
    let mime_type = mime_type
        .ok_or_else(|| AppError::InvalidInput("image field has no content type".to_string()))?;

    if !is_accepted_mime(&mime_type) {
        return Err(AppError::InvalidInput(
            "only PNG and JPEG images are allowed".to_string(),
        ));
    }
    let prompt = prompts::prompt_for(&transformation).ok_or_else(|| {
        AppError::InvalidInput(format!("unknown transformation '{}'", transformation))
    })?;

    let normalized = canvas::normalize_to_canvas(&image_bytes)?;
    let mask = canvas::full_edit_mask()?;

    let url = state
        .openai_client
        .edit_image(normalized, mask, prompt)
        .await?;
    Ok(Json(json!({ "url": url })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::{router, AppState};
    use crate::openai::client::OpenAiImageClient;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use tower::ServiceExt;

    const BOUNDARY: &str = "photoctl-test-boundary";

    // Upstream points at a discard port; any handler that mistakenly called
    // out would come back 502 instead of the asserted 400.
    fn test_app() -> Router {
        let state = Arc::new(AppState {
            openai_client: OpenAiImageClient::new(
                "http://127.0.0.1:9/v1/images/edits".to_string(),
                "test-key".to_string(),
            ),
        });
        router(state)
    }

    fn sample_png() -> Vec<u8> {
        let img = RgbImage::from_pixel(8, 8, Rgb([0, 128, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    fn push_text_field(body: &mut Vec<u8>, name: &str, value: &str) {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    fn push_file_field(body: &mut Vec<u8>, name: &str, mime: &str, bytes: &[u8]) {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"photo\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, mime
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    fn close_form(body: &mut Vec<u8>) {
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    }

    fn transform_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/image/transform")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn transformations_endpoint_lists_the_canned_edits() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/image/transformations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let list = json["transformations"].as_array().unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list[1]["effect"], "older");
        assert_eq!(list[1]["name"], "Older");
        assert!(list[1]["description"].as_str().unwrap().contains("60"));
        // Prompt text stays internal.
        assert!(list[1].get("prompt").is_none());
    }

    #[tokio::test]
    async fn unknown_transformation_is_rejected_before_any_upstream_call() {
        let mut body = Vec::new();
        push_file_field(&mut body, "image", "image/png", &sample_png());
        push_text_field(&mut body, "transformation", "sparkly");
        close_form(&mut body);

        let response = test_app().oneshot(transform_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("sparkly"));
    }

    #[tokio::test]
    async fn missing_image_field_is_invalid_input() {
        let mut body = Vec::new();
        push_text_field(&mut body, "transformation", "older");
        close_form(&mut body);

        let response = test_app().oneshot(transform_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("no image file"));
    }

    #[tokio::test]
    async fn missing_transformation_field_is_invalid_input() {
        let mut body = Vec::new();
        push_file_field(&mut body, "image", "image/png", &sample_png());
        close_form(&mut body);

        let response = test_app().oneshot(transform_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("no transformation"));
    }

    #[tokio::test]
    async fn non_raster_mime_type_is_rejected() {
        let mut body = Vec::new();
        push_file_field(&mut body, "image", "image/gif", &sample_png());
        push_text_field(&mut body, "transformation", "older");
        close_form(&mut body);

        let response = test_app().oneshot(transform_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("PNG and JPEG"));
    }

    #[tokio::test]
    async fn root_identifies_the_service() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&bytes[..], b"Photo Transform Proxy");
    }
}
