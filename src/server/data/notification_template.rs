use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::notification::{NotificationTemplate, NotificationTemplateParams},
};

pub struct NotificationTemplateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationTemplateRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: NotificationTemplateParams,
    ) -> Result<NotificationTemplate, AppError> {
        let now = Utc::now();
        let template = entity::notification_template::ActiveModel {
            key: ActiveValue::Set(params.key),
            channel: ActiveValue::Set(params.channel.as_str().to_string()),
            subject: ActiveValue::Set(params.subject),
            body: ActiveValue::Set(params.body),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        NotificationTemplate::from_entity(template)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<NotificationTemplate>, AppError> {
        entity::prelude::NotificationTemplate::find_by_id(id)
            .one(self.db)
            .await?
            .map(NotificationTemplate::from_entity)
            .transpose()
    }

    /// Finds an active template by key. Inactive templates are treated as missing.
    pub async fn find_active_by_key(
        &self,
        key: &str,
    ) -> Result<Option<NotificationTemplate>, AppError> {
        entity::prelude::NotificationTemplate::find()
            .filter(entity::notification_template::Column::Key.eq(key))
            .filter(entity::notification_template::Column::IsActive.eq(true))
            .one(self.db)
            .await?
            .map(NotificationTemplate::from_entity)
            .transpose()
    }

    pub async fn key_taken(&self, key: &str) -> Result<bool, AppError> {
        let count = entity::prelude::NotificationTemplate::find()
            .filter(entity::notification_template::Column::Key.eq(key))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets every template ordered by key.
    pub async fn get_all(&self) -> Result<Vec<NotificationTemplate>, AppError> {
        entity::prelude::NotificationTemplate::find()
            .order_by_asc(entity::notification_template::Column::Key)
            .all(self.db)
            .await?
            .into_iter()
            .map(NotificationTemplate::from_entity)
            .collect()
    }

    /// Updates channel, subject, body and active flag. The key never changes.
    pub async fn update(
        &self,
        id: i32,
        params: NotificationTemplateParams,
    ) -> Result<Option<NotificationTemplate>, AppError> {
        let Some(template) = entity::prelude::NotificationTemplate::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::notification_template::ActiveModel = template.into();
        active.channel = ActiveValue::Set(params.channel.as_str().to_string());
        active.subject = ActiveValue::Set(params.subject);
        active.body = ActiveValue::Set(params.body);
        active.is_active = ActiveValue::Set(params.is_active);
        active.updated_at = ActiveValue::Set(Utc::now());

        NotificationTemplate::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::NotificationTemplate::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
