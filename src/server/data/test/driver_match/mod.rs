use crate::{
    model::status::MatchStatus,
    server::{
        data::driver_match::DriverMatchRepository,
        error::AppError,
        model::driver_match::{CreateMatchParams, MatchFilter},
    },
};
use chrono::Utc;
use test_utils::{builder::TestBuilder, factory};

mod count_active_for_request;
mod set_status;
mod transition_for_request;
