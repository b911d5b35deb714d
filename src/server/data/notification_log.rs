use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        notification::{CreateNotificationLogParams, NotificationLogEntry},
        page::Paginated,
    },
};

pub struct NotificationLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateNotificationLogParams,
    ) -> Result<NotificationLogEntry, AppError> {
        let entry = entity::notification_log::ActiveModel {
            template_key: ActiveValue::Set(params.template_key),
            channel: ActiveValue::Set(params.channel.as_str().to_string()),
            recipient: ActiveValue::Set(params.recipient),
            body: ActiveValue::Set(params.body),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            error: ActiveValue::Set(params.error),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        NotificationLogEntry::from_entity(entry)
    }

    /// Gets a page of delivery attempts, newest first.
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<NotificationLogEntry>, AppError> {
        let paginator = entity::prelude::NotificationLog::find()
            .order_by_desc(entity::notification_log::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(NotificationLogEntry::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(entries, total, page, per_page))
    }
}
