//! Template-based notifications.
//!
//! `Notifier` looks up an active template by key, renders it, hands it to the SMS or email
//! provider and records the attempt in `notification_log`. One-time codes are masked in the
//! logged body. `dispatch` runs the same send on a spawned task so callers never wait on a
//! provider.

pub mod render;
pub mod template;

use sea_orm::DatabaseConnection;
use std::{collections::HashMap, sync::Arc};

use crate::{
    model::status::{Channel, NotificationStatus},
    server::{
        data::{
            notification_log::NotificationLogRepository,
            notification_template::NotificationTemplateRepository,
        },
        error::AppError,
        model::notification::{CreateNotificationLogParams, NotificationLogEntry, Recipient},
        service::provider::{EmailProvider, Providers, SmsProvider},
    },
};

pub const OTP_CODE_TEMPLATE: &str = "otp.code";
pub const OTP_EMAIL_TEMPLATE: &str = "otp.code.email";
pub const DRIVER_APPROVED_TEMPLATE: &str = "driver.approved";
pub const DRIVER_REJECTED_TEMPLATE: &str = "driver.rejected";
pub const MATCH_ASSIGNED_TEMPLATE: &str = "match.assigned";

const OTP_TEMPLATES: [&str; 2] = [OTP_CODE_TEMPLATE, OTP_EMAIL_TEMPLATE];
const MASKED_CODE: &str = "******";

#[derive(Clone)]
pub struct Notifier {
    db: DatabaseConnection,
    sms: Arc<dyn SmsProvider>,
    email: Arc<dyn EmailProvider>,
}

impl Notifier {
    pub fn new(db: DatabaseConnection, providers: &Providers) -> Self {
        Self {
            db,
            sms: providers.sms.clone(),
            email: providers.email.clone(),
        }
    }

    /// Renders and delivers the template `key` to `recipient`.
    ///
    /// A missing or inactive template, or a recipient without an address on the template's
    /// channel, is logged as a warning and nothing is sent. Provider failures are recorded
    /// in the log with status `failed` rather than returned.
    ///
    /// # Returns
    /// - `Ok(Some(NotificationLogEntry))` - The recorded delivery attempt
    /// - `Ok(None)` - Nothing was sent
    /// - `Err(AppError)` - Template lookup or log insert failed
    pub async fn send(
        &self,
        key: &str,
        recipient: &Recipient,
        variables: &HashMap<String, String>,
    ) -> Result<Option<NotificationLogEntry>, AppError> {
        let Some(template) = NotificationTemplateRepository::new(&self.db)
            .find_active_by_key(key)
            .await?
        else {
            tracing::warn!("Notification template {} missing or inactive, skipping", key);
            return Ok(None);
        };

        let Some(address) = recipient.address_for(template.channel) else {
            tracing::warn!(
                "No {} address for notification {}, skipping",
                template.channel,
                key
            );
            return Ok(None);
        };

        let body = render::render(&template.body, variables);
        let result = match template.channel {
            Channel::Sms => self.sms.send_sms(address, &body).await,
            Channel::Email => {
                let subject = render::render(
                    template.subject.as_deref().unwrap_or_default(),
                    variables,
                );
                self.email.send_email(address, &subject, &body).await
            }
        };

        let (status, error) = match result {
            Ok(()) => (NotificationStatus::Sent, None),
            Err(e) => {
                tracing::warn!("Failed to deliver notification {} to {}: {}", key, address, e);
                (NotificationStatus::Failed, Some(e.to_string()))
            }
        };

        let body = if OTP_TEMPLATES.contains(&key) {
            let mut masked = variables.clone();
            masked.insert("code".to_string(), MASKED_CODE.to_string());
            render::render(&template.body, &masked)
        } else {
            body
        };

        let entry = NotificationLogRepository::new(&self.db)
            .create(CreateNotificationLogParams {
                template_key: key.to_string(),
                channel: template.channel,
                recipient: address.to_string(),
                body,
                status,
                error,
            })
            .await?;

        Ok(Some(entry))
    }

    /// Sends in the background with a single attempt. Errors are logged.
    pub fn dispatch(&self, key: &str, recipient: Recipient, variables: HashMap<String, String>) {
        let notifier = self.clone();
        let key = key.to_string();

        tokio::spawn(async move {
            if let Err(e) = notifier.send(&key, &recipient, &variables).await {
                tracing::error!("Notification {} failed: {}", key, e);
            }
        });
    }
}

/// Builds a variable map from `(name, value)` pairs.
pub fn variables<const N: usize>(pairs: [(&str, String); N]) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
