use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::server::{
    config::ProviderEndpoint,
    error::provider::ProviderError,
    service::provider::{check_status, IdentityCheck, IdentityProvider},
};

#[derive(Deserialize)]
struct IdentityResponse {
    verified: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Checks a national id number against an identity verification API.
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    endpoint: ProviderEndpoint,
}

impl HttpIdentityProvider {
    pub fn new(http: reqwest::Client, endpoint: ProviderEndpoint) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn verify_national_id(
        &self,
        id_number: &str,
        full_name: &str,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<IdentityCheck, ProviderError> {
        let response = self
            .http
            .post(&self.endpoint.api_url)
            .bearer_auth(&self.endpoint.api_key)
            .json(&json!({
                "id_number": id_number,
                "full_name": full_name,
                "date_of_birth": date_of_birth.map(|d| d.to_string()),
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: "identity",
                source,
            })?;

        let parsed: IdentityResponse = check_status("identity", response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse {
                provider: "identity",
                reason: e.to_string(),
            })?;

        Ok(IdentityCheck {
            matched: parsed.verified,
            detail: parsed.message,
        })
    }
}
