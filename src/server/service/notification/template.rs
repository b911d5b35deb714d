//! Notification template management and the delivery log.

use sea_orm::DatabaseConnection;
use std::collections::HashMap;

use crate::{
    model::status::Channel,
    server::{
        data::{
            notification_log::NotificationLogRepository,
            notification_template::NotificationTemplateRepository,
        },
        error::AppError,
        model::{
            notification::{NotificationLogEntry, NotificationTemplate, NotificationTemplateParams},
            page::Paginated,
        },
        service::notification::render::render,
        util::parse::{optional_text, required_text},
    },
};

/// Rendered subject and body of a template preview.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTemplate {
    pub subject: Option<String>,
    pub body: String,
}

pub struct NotificationTemplateService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationTemplateService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<NotificationTemplate>, AppError> {
        NotificationTemplateRepository::new(self.db).get_all().await
    }

    pub async fn get(&self, id: i32) -> Result<NotificationTemplate, AppError> {
        NotificationTemplateRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notification template {} not found", id)))
    }

    /// Creates a template.
    ///
    /// # Returns
    /// - `Ok(NotificationTemplate)` - Created template
    /// - `Err(AppError::Validation)` - Bad key, empty body, or email template without subject
    /// - `Err(AppError::Conflict)` - Key already used
    pub async fn create(
        &self,
        params: NotificationTemplateParams,
    ) -> Result<NotificationTemplate, AppError> {
        let params = validate(params)?;
        let repo = NotificationTemplateRepository::new(self.db);

        if repo.key_taken(&params.key).await? {
            return Err(AppError::Conflict(format!(
                "Notification template {} already exists",
                params.key
            )));
        }

        repo.create(params).await
    }

    /// Updates channel, subject, body and active flag. The key never changes.
    pub async fn update(
        &self,
        id: i32,
        params: NotificationTemplateParams,
    ) -> Result<NotificationTemplate, AppError> {
        let existing = self.get(id).await?;
        let params = validate(NotificationTemplateParams {
            key: existing.key,
            ..params
        })?;

        NotificationTemplateRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notification template {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !NotificationTemplateRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Notification template {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Renders a template with sample variables without sending it.
    pub async fn preview(
        &self,
        id: i32,
        variables: &HashMap<String, String>,
    ) -> Result<RenderedTemplate, AppError> {
        let template = self.get(id).await?;

        Ok(RenderedTemplate {
            subject: template.subject.as_deref().map(|s| render(s, variables)),
            body: render(&template.body, variables),
        })
    }

    pub async fn get_log(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<NotificationLogEntry>, AppError> {
        NotificationLogRepository::new(self.db)
            .get_paginated(page, per_page)
            .await
    }
}

/// Template keys are lowercase letters, digits, dots and underscores.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
}

fn validate(params: NotificationTemplateParams) -> Result<NotificationTemplateParams, AppError> {
    let key = params.key.trim().to_string();
    if !is_valid_key(&key) {
        return Err(AppError::Validation(
            "key may only contain a-z, 0-9, '.' and '_'".to_string(),
        ));
    }

    let subject = optional_text(params.subject);
    if params.channel == Channel::Email && subject.is_none() {
        return Err(AppError::Validation(
            "subject is required for email templates".to_string(),
        ));
    }

    Ok(NotificationTemplateParams {
        key,
        channel: params.channel,
        subject,
        body: required_text("body", params.body)?,
        is_active: params.is_active,
    })
}
