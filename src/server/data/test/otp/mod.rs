use crate::{
    model::status::{Channel, OtpPurpose},
    server::{data::otp::OtpRepository, error::AppError, model::otp::CreateOtpParams},
};
use chrono::{Duration, Utc};
use entity::prelude::OtpVerification;
use test_utils::builder::TestBuilder;

mod find_latest_pending;
mod purge_expired_before;

fn params(identifier: &str, expires_in: Duration) -> CreateOtpParams {
    CreateOtpParams {
        identifier: identifier.to_string(),
        channel: Channel::Sms,
        purpose: OtpPurpose::PhoneVerification,
        code_hash: "hash".to_string(),
        expires_at: Utc::now() + expires_in,
        created_at: Utc::now(),
    }
}
