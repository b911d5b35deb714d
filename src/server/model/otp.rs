use chrono::{DateTime, Utc};

use crate::{
    model::status::{Channel, OtpPurpose},
    server::{error::AppError, util::parse::parse_stored},
};

/// A stored one-time code. Only the sha256 hash of the code is kept.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: i32,
    pub identifier: String,
    pub channel: Channel,
    pub purpose: OtpPurpose,
    pub code_hash: String,
    pub attempts: i32,
    pub expires_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn from_entity(entity: entity::otp_verification::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            identifier: entity.identifier,
            channel: parse_stored(&entity.channel)?,
            purpose: parse_stored(&entity.purpose)?,
            code_hash: entity.code_hash,
            attempts: entity.attempts,
            expires_at: entity.expires_at,
            verified_at: entity.verified_at,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateOtpParams {
    pub identifier: String,
    pub channel: Channel,
    pub purpose: OtpPurpose,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
