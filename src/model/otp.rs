use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::{Channel, OtpPurpose};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct RequestOtpDto {
    pub channel: Channel,
    pub purpose: OtpPurpose,
    /// Phone number to verify when no driver is logged in (right after registration).
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct VerifyOtpDto {
    pub identifier: String,
    pub purpose: OtpPurpose,
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct OtpIssuedDto {
    pub identifier: String,
    pub channel: Channel,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct OtpVerifiedDto {
    pub identifier: String,
    pub purpose: OtpPurpose,
    pub verified_at: DateTime<Utc>,
}
