use chrono::{DateTime, Utc};

use crate::{
    model::{
        notification::{NotificationLogDto, NotificationTemplateDto},
        status::{Channel, NotificationStatus},
    },
    server::{error::AppError, util::parse::parse_stored},
};

#[derive(Debug, Clone)]
pub struct NotificationTemplate {
    pub id: i32,
    pub key: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl NotificationTemplate {
    pub fn from_entity(entity: entity::notification_template::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            key: entity.key,
            channel: parse_stored(&entity.channel)?,
            subject: entity.subject,
            body: entity.body,
            is_active: entity.is_active,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> NotificationTemplateDto {
        NotificationTemplateDto {
            id: self.id,
            key: self.key,
            channel: self.channel,
            subject: self.subject,
            body: self.body,
            is_active: self.is_active,
            updated_at: self.updated_at,
        }
    }
}

/// Template fields written on create and update. `key` is ignored on update.
#[derive(Debug, Clone)]
pub struct NotificationTemplateParams {
    pub key: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NotificationLogEntry {
    pub id: i32,
    pub template_key: String,
    pub channel: Channel,
    pub recipient: String,
    pub body: String,
    pub status: NotificationStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NotificationLogEntry {
    pub fn from_entity(entity: entity::notification_log::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            template_key: entity.template_key,
            channel: parse_stored(&entity.channel)?,
            recipient: entity.recipient,
            body: entity.body,
            status: parse_stored(&entity.status)?,
            error: entity.error,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> NotificationLogDto {
        NotificationLogDto {
            id: self.id,
            template_key: self.template_key,
            channel: self.channel,
            recipient: self.recipient,
            body: self.body,
            status: self.status,
            error: self.error,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNotificationLogParams {
    pub template_key: String,
    pub channel: Channel,
    pub recipient: String,
    pub body: String,
    pub status: NotificationStatus,
    pub error: Option<String>,
}

/// Contact details a notification can be delivered to.
#[derive(Debug, Clone, Default)]
pub struct Recipient {
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Recipient {
    pub fn address_for(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Sms => self.phone.as_deref(),
            Channel::Email => self.email.as_deref(),
        }
    }
}
