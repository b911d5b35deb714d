use async_trait::async_trait;
use serde_json::json;

use crate::server::{
    config::SmsConfig,
    error::provider::ProviderError,
    service::provider::{check_status, SmsProvider},
};

/// Sends SMS through a JSON gateway authenticated with a bearer key.
pub struct HttpSmsProvider {
    http: reqwest::Client,
    config: SmsConfig,
}

impl HttpSmsProvider {
    const NAME: &'static str = "http";

    pub fn new(http: reqwest::Client, config: SmsConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl SmsProvider for HttpSmsProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn send_sms(&self, to: &str, body: &str) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "from": self.config.sender_id,
                "to": to,
                "message": body,
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: "sms",
                source,
            })?;

        check_status("sms", response).await?;

        Ok(())
    }
}

/// Used when no SMS gateway is configured; messages are only logged.
pub struct LogSmsProvider;

impl LogSmsProvider {
    pub const NAME: &'static str = "log";
}

#[async_trait]
impl SmsProvider for LogSmsProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn send_sms(&self, to: &str, body: &str) -> Result<(), ProviderError> {
        tracing::info!(to, body, "SMS gateway not configured, message logged only");
        Ok(())
    }
}
