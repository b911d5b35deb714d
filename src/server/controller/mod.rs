//! HTTP handlers.
//!
//! Each handler authenticates through a guard, converts DTOs into service parameters,
//! calls one service and converts the result back into a DTO.

pub mod admin_user;
pub mod auth;
pub mod company;
pub mod driver;
pub mod driver_portal;
pub mod integration;
pub mod matching;
pub mod notification;
pub mod payment;
pub mod request;
pub mod role;
pub mod setup;
pub mod stats;

use serde::Deserialize;
use utoipa::IntoParams;

/// Zero-based page number and page size shared by every listing endpoint.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 20, max: 100)
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl PaginationParams {
    pub fn entries(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES)
    }
}

const MAX_ENTRIES: u64 = 100;

fn default_entries() -> u64 {
    20
}
