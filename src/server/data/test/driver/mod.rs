use crate::{
    model::status::{DriverStatus, OtpPurpose, VerificationStatus},
    server::{
        data::driver::DriverRepository,
        error::AppError,
        model::driver::{CreateDriverParams, DriverFilter},
    },
};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_available;
mod get_paginated;
mod mark_contact_verified;
mod reject;
mod set_status_many;
