//! One-time code data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    model::status::OtpPurpose,
    server::{
        error::AppError,
        model::otp::{CreateOtpParams, OtpRecord},
    },
};

pub struct OtpRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OtpRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateOtpParams) -> Result<OtpRecord, AppError> {
        let record = entity::otp_verification::ActiveModel {
            identifier: ActiveValue::Set(params.identifier),
            channel: ActiveValue::Set(params.channel.as_str().to_string()),
            purpose: ActiveValue::Set(params.purpose.as_str().to_string()),
            code_hash: ActiveValue::Set(params.code_hash),
            attempts: ActiveValue::Set(0),
            expires_at: ActiveValue::Set(params.expires_at),
            verified_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(params.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        OtpRecord::from_entity(record)
    }

    /// Gets the newest unverified code for an identifier and purpose.
    pub async fn find_latest_pending(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, AppError> {
        entity::prelude::OtpVerification::find()
            .filter(entity::otp_verification::Column::Identifier.eq(identifier))
            .filter(entity::otp_verification::Column::Purpose.eq(purpose.as_str()))
            .filter(entity::otp_verification::Column::VerifiedAt.is_null())
            .order_by_desc(entity::otp_verification::Column::CreatedAt)
            .order_by_desc(entity::otp_verification::Column::Id)
            .one(self.db)
            .await?
            .map(OtpRecord::from_entity)
            .transpose()
    }

    /// Deletes every unverified code for an identifier and purpose.
    pub async fn invalidate_pending(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
    ) -> Result<u64, AppError> {
        let result = entity::prelude::OtpVerification::delete_many()
            .filter(entity::otp_verification::Column::Identifier.eq(identifier))
            .filter(entity::otp_verification::Column::Purpose.eq(purpose.as_str()))
            .filter(entity::otp_verification::Column::VerifiedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Stores a new attempt count.
    pub async fn set_attempts(&self, id: i32, attempts: i32) -> Result<(), AppError> {
        entity::otp_verification::ActiveModel {
            id: ActiveValue::Unchanged(id),
            attempts: ActiveValue::Set(attempts),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn mark_verified(&self, id: i32, verified_at: DateTime<Utc>) -> Result<(), AppError> {
        entity::otp_verification::ActiveModel {
            id: ActiveValue::Unchanged(id),
            verified_at: ActiveValue::Set(Some(verified_at)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Deletes codes that expired before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records deleted
    pub async fn purge_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::OtpVerification::delete_many()
            .filter(entity::otp_verification::Column::ExpiresAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
