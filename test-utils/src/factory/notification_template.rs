//! Notification template factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test notification templates.
///
/// Defaults to an active SMS template with key `"test.template.{id}"` and a body using the
/// `{{name}}` placeholder.
pub struct NotificationTemplateFactory<'a> {
    db: &'a DatabaseConnection,
    key: String,
    channel: String,
    subject: Option<String>,
    body: String,
    is_active: bool,
}

impl<'a> NotificationTemplateFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            key: format!("test.template.{}", id),
            channel: "sms".to_string(),
            subject: None,
            body: "Hello {{name}}".to_string(),
            is_active: true,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Switches the template to the email channel with the given subject.
    pub fn email(mut self, subject: impl Into<String>) -> Self {
        self.channel = "email".to_string();
        self.subject = Some(subject.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub async fn build(self) -> Result<entity::notification_template::Model, DbErr> {
        let now = Utc::now();
        entity::notification_template::ActiveModel {
            key: ActiveValue::Set(self.key),
            channel: ActiveValue::Set(self.channel),
            subject: ActiveValue::Set(self.subject),
            body: ActiveValue::Set(self.body),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active SMS template with the given key and body.
pub async fn create_template(
    db: &DatabaseConnection,
    key: &str,
    body: &str,
) -> Result<entity::notification_template::Model, DbErr> {
    NotificationTemplateFactory::new(db)
        .key(key)
        .body(body)
        .build()
        .await
}
