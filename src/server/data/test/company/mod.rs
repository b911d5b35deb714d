use crate::server::{
    data::{company::CompanyRepository, company_request::CompanyRequestRepository},
    error::AppError,
    model::company::{CompanyFilter, CompanyParams},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_paginated;
