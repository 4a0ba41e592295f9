//! Thin HTTP client for the OpenAI image-edit endpoint.
//!
//! - `edit_image` posts image + mask + prompt as multipart form data and
//!   returns the first result URL.
//! Each call is a single best-effort attempt; there are no retries.
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ImagesEditResponse {
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiImageClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl OpenAiImageClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        OpenAiImageClient {
            client: Client::new(),
            api_url,
            api_key,
        }
    }

    /// Submit an edit request for a normalized PNG with a full-coverage mask.
    ///
    /// Sends the fixed generation parameters the provider expects (one image,
    /// 1024x1024, URL response format) and returns the first URL from the
    /// response. A success status without a URL is `UpstreamInvalidResponse`.
    pub async fn edit_image(
        &self,
        image_png: Vec<u8>,
        mask_png: Vec<u8>,
        prompt: &str,
    ) -> AppResult<String> {
        tracing::info!("Sending image-edit request to {}", self.api_url);
        tracing::debug!("Prompt: {}", prompt);

        let form = Form::new()
            .part(
                "image",
                Part::bytes(image_png)
                    .file_name("image.png")
                    .mime_str("image/png")
                    .map_err(AppError::HttpClient)?,
            )
            .part(
                "mask",
                Part::bytes(mask_png)
                    .file_name("mask.png")
                    .mime_str("image/png")
                    .map_err(AppError::HttpClient)?,
            )
            .text("prompt", prompt.to_string())
            .text("n", "1")
            .text("size", "1024x1024")
            .text("response_format", "url");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            let body = response.text().await.map_err(AppError::HttpClient)?;
            let url = first_result_url(&body)?;
            tracing::info!("Image edit succeeded: {}", url);
            Ok(url)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            let message = upstream_error_message(&error_body)
                .unwrap_or_else(|| format!("image-edit request failed with status {}", status));
            tracing::error!("Image edit failed. Status: {}, Body: {}", status, error_body);
            Err(AppError::Upstream(message))
        }
    }
}

/// Extract the first result URL from a success body, verbatim.
pub fn first_result_url(body: &str) -> AppResult<String> {
    let parsed: ImagesEditResponse = serde_json::from_str(body)
        .map_err(|e| AppError::UpstreamInvalidResponse(format!("malformed body: {}", e)))?;
    parsed
        .data
        .into_iter()
        .next()
        .and_then(|img| img.url)
        .ok_or_else(|| AppError::UpstreamInvalidResponse("response contains no image URL".to_string()))
}

/// Pull `error.message` out of an upstream error body when it parses.
pub fn upstream_error_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_url_is_returned_verbatim() {
        let body = r#"{"created": 1712345678, "data": [
            {"url": "https://cdn.example.com/edit-1.png"},
            {"url": "https://cdn.example.com/edit-2.png"}
        ]}"#;
        assert_eq!(
            first_result_url(body).unwrap(),
            "https://cdn.example.com/edit-1.png"
        );
    }

    #[test]
    fn missing_url_is_an_invalid_response_not_a_crash() {
        for body in [r#"{"data": []}"#, r#"{"data": [{}]}"#, r#"{"created": 1}"#] {
            let err = first_result_url(body).unwrap_err();
            assert!(matches!(err, AppError::UpstreamInvalidResponse(_)));
        }
    }

    #[test]
    fn non_json_success_body_is_an_invalid_response() {
        let err = first_result_url("<html>ok</html>").unwrap_err();
        assert!(matches!(err, AppError::UpstreamInvalidResponse(_)));
    }

    #[test]
    fn upstream_error_message_is_surfaced_when_present() {
        let body = r#"{"error": {"message": "Invalid image size", "type": "invalid_request_error"}}"#;
        assert_eq!(
            upstream_error_message(body).as_deref(),
            Some("Invalid image size")
        );
        assert_eq!(upstream_error_message("not json"), None);
        assert_eq!(upstream_error_message(r#"{"error": {}}"#), None);
    }
}
