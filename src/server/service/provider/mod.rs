//! Third-party integrations behind small provider traits.
//!
//! SMS and email always have an implementation: the HTTP one when credentials are
//! configured, otherwise one that only logs the message. OCR and identity verification
//! are optional and simply absent when not configured.

pub mod email;
pub mod identity;
pub mod ocr;
pub mod sms;

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::{
    model::integration::IntegrationStatusDto,
    server::{config::WebhookSecrets, error::provider::ProviderError},
};

pub use email::{HttpEmailProvider, LogEmailProvider};
pub use identity::HttpIdentityProvider;
pub use ocr::HttpOcrProvider;
pub use sms::{HttpSmsProvider, LogSmsProvider};

#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Short identifier shown on the integrations page.
    fn name(&self) -> &'static str;

    async fn send_sms(&self, to: &str, body: &str) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait OcrProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Extracts text from an uploaded document.
    async fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, ProviderError>;
}

/// Outcome of a national id lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityCheck {
    pub matched: bool,
    pub detail: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn verify_national_id(
        &self,
        id_number: &str,
        full_name: &str,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<IdentityCheck, ProviderError>;
}

/// The provider implementations selected at startup.
#[derive(Clone)]
pub struct Providers {
    pub sms: Arc<dyn SmsProvider>,
    pub email: Arc<dyn EmailProvider>,
    pub ocr: Option<Arc<dyn OcrProvider>>,
    pub identity: Option<Arc<dyn IdentityProvider>>,
}

impl Providers {
    /// Providers that deliver nothing and only log outgoing messages.
    pub fn log_only() -> Self {
        Self {
            sms: Arc::new(LogSmsProvider),
            email: Arc::new(LogEmailProvider),
            ocr: None,
            identity: None,
        }
    }

    /// Reports which integrations are configured without exposing any credential.
    pub fn status(&self, webhooks: &WebhookSecrets) -> Vec<IntegrationStatusDto> {
        let entry = |kind: &str, provider: &str, configured: bool| IntegrationStatusDto {
            kind: kind.to_string(),
            provider: provider.to_string(),
            configured,
        };

        vec![
            entry("sms", self.sms.name(), self.sms.name() != LogSmsProvider::NAME),
            entry(
                "email",
                self.email.name(),
                self.email.name() != LogEmailProvider::NAME,
            ),
            entry(
                "ocr",
                self.ocr.as_ref().map_or("disabled", |p| p.name()),
                self.ocr.is_some(),
            ),
            entry(
                "identity",
                self.identity.as_ref().map_or("disabled", |p| p.name()),
                self.identity.is_some(),
            ),
            entry(
                "payment",
                "paystack",
                webhooks.paystack_secret_key.is_some(),
            ),
            entry(
                "payment",
                "flutterwave",
                webhooks.flutterwave_secret_hash.is_some(),
            ),
            entry("payment", "stripe", webhooks.stripe_webhook_secret.is_some()),
        ]
    }
}

/// Reads a successful response body or turns a failure status into `ProviderError::Status`.
pub(crate) async fn check_status(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        provider,
        status: status.as_u16(),
        body,
    })
}
