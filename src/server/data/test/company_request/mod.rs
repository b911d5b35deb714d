use crate::{
    model::status::RequestStatus,
    server::{
        data::company_request::CompanyRequestRepository,
        error::AppError,
        model::company_request::{CompanyRequestFilter, CreateCompanyRequestParams},
    },
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_matchable;
