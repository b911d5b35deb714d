use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_UPLOAD_DIR: &str = "./uploads";

/// SMS gateway credentials.
#[derive(Clone, Debug)]
pub struct SmsConfig {
    pub api_url: String,
    pub api_key: String,
    pub sender_id: String,
}

/// Transactional email API credentials.
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

/// Endpoint and key for the OCR and identity verification providers.
#[derive(Clone, Debug)]
pub struct ProviderEndpoint {
    pub api_url: String,
    pub api_key: String,
}

/// Shared secrets used to authenticate payment webhooks.
#[derive(Clone, Debug, Default)]
pub struct WebhookSecrets {
    pub paystack_secret_key: Option<String>,
    pub flutterwave_secret_hash: Option<String>,
    pub stripe_webhook_secret: Option<String>,
}

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_address: String,
    pub upload_dir: String,
    pub auto_match_cron: Option<String>,

    pub sms: Option<SmsConfig>,
    pub email: Option<EmailConfig>,
    pub ocr: Option<ProviderEndpoint>,
    pub identity: Option<ProviderEndpoint>,

    pub webhooks: WebhookSecrets,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let app_url = optional("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string());
        url::Url::parse(&app_url).map_err(|e| ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            reason: e.to_string(),
        })?;

        let sms = match (optional("SMS_API_URL"), optional("SMS_API_KEY")) {
            (Some(api_url), Some(api_key)) => Some(SmsConfig {
                api_url,
                api_key,
                sender_id: optional("SMS_SENDER_ID").unwrap_or_else(|| "FleetBroker".to_string()),
            }),
            _ => None,
        };

        let email = match (optional("EMAIL_API_URL"), optional("EMAIL_API_KEY")) {
            (Some(api_url), Some(api_key)) => Some(EmailConfig {
                api_url,
                api_key,
                from: optional("EMAIL_FROM")
                    .ok_or_else(|| ConfigError::MissingEnvVar("EMAIL_FROM".to_string()))?,
            }),
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            app_url,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            upload_dir: optional("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            auto_match_cron: optional("AUTO_MATCH_CRON"),
            sms,
            email,
            ocr: endpoint("OCR_API_URL", "OCR_API_KEY"),
            identity: endpoint("IDENTITY_API_URL", "IDENTITY_API_KEY"),
            webhooks: WebhookSecrets {
                paystack_secret_key: optional("PAYSTACK_SECRET_KEY"),
                flutterwave_secret_hash: optional("FLUTTERWAVE_SECRET_HASH"),
                stripe_webhook_secret: optional("STRIPE_WEBHOOK_SECRET"),
            },
        })
    }
}

/// Reads a variable, treating empty values as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn endpoint(url_var: &str, key_var: &str) -> Option<ProviderEndpoint> {
    Some(ProviderEndpoint {
        api_url: optional(url_var)?,
        api_key: optional(key_var)?,
    })
}
