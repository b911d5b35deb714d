use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use serde::Deserialize;
use serde_json::json;

use crate::server::{
    config::ProviderEndpoint,
    error::provider::ProviderError,
    service::provider::{check_status, OcrProvider},
};

#[derive(Deserialize)]
struct OcrResponse {
    text: String,
}

/// Posts documents as base64 to an OCR API and returns the recognized text.
pub struct HttpOcrProvider {
    http: reqwest::Client,
    endpoint: ProviderEndpoint,
}

impl HttpOcrProvider {
    pub fn new(http: reqwest::Client, endpoint: ProviderEndpoint) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl OcrProvider for HttpOcrProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(&self.endpoint.api_url)
            .bearer_auth(&self.endpoint.api_key)
            .json(&json!({
                "file_name": file_name,
                "content": BASE64_STANDARD.encode(bytes),
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: "ocr",
                source,
            })?;

        let parsed: OcrResponse = check_status("ocr", response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse {
                provider: "ocr",
                reason: e.to_string(),
            })?;

        Ok(parsed.text)
    }
}
