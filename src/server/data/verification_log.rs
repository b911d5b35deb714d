use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    model::status::VerificationAction,
    server::{error::AppError, model::driver::VerificationLogEntry},
};

/// Append-only audit trail of KYC and verification transitions.
pub struct VerificationLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VerificationLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends an entry. `admin_user_id` is `None` for driver or system actions.
    pub async fn append(
        &self,
        driver_id: i32,
        admin_user_id: Option<i32>,
        action: VerificationAction,
        note: Option<String>,
    ) -> Result<VerificationLogEntry, AppError> {
        let entry = entity::driver_verification_log::ActiveModel {
            driver_id: ActiveValue::Set(driver_id),
            admin_user_id: ActiveValue::Set(admin_user_id),
            action: ActiveValue::Set(action.as_str().to_string()),
            note: ActiveValue::Set(note),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        VerificationLogEntry::from_entity(entry)
    }

    /// Gets a driver's log entries in the order they were written.
    pub async fn get_by_driver(
        &self,
        driver_id: i32,
    ) -> Result<Vec<VerificationLogEntry>, AppError> {
        entity::prelude::DriverVerificationLog::find()
            .filter(entity::driver_verification_log::Column::DriverId.eq(driver_id))
            .order_by_asc(entity::driver_verification_log::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(VerificationLogEntry::from_entity)
            .collect()
    }
}
