use async_trait::async_trait;
use serde_json::json;

use crate::server::{
    config::EmailConfig,
    error::provider::ProviderError,
    service::provider::{check_status, EmailProvider},
};

/// Sends email through a transactional email API.
pub struct HttpEmailProvider {
    http: reqwest::Client,
    config: EmailConfig,
}

impl HttpEmailProvider {
    const NAME: &'static str = "http";

    pub fn new(http: reqwest::Client, config: EmailConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl EmailProvider for HttpEmailProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "from": self.config.from,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: "email",
                source,
            })?;

        check_status("email", response).await?;

        Ok(())
    }
}

pub struct LogEmailProvider;

impl LogEmailProvider {
    pub const NAME: &'static str = "log";
}

#[async_trait]
impl EmailProvider for LogEmailProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), ProviderError> {
        tracing::info!(to, subject, body, "Email API not configured, message logged only");
        Ok(())
    }
}
