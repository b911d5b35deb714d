use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::model::status::{Channel, NotificationStatus};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct NotificationTemplateDto {
    pub id: i32,
    pub key: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateNotificationTemplateDto {
    pub key: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UpdateNotificationTemplateDto {
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct PreviewTemplateDto {
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct RenderedTemplateDto {
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct NotificationLogDto {
    pub id: i32,
    pub template_key: String,
    pub channel: Channel,
    pub recipient: String,
    pub body: String,
    pub status: NotificationStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}
