use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::MatchStatus;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MatchDto {
    pub id: i32,
    pub driver_id: i32,
    pub company_request_id: i32,
    pub status: MatchStatus,
    pub auto_matched: bool,
    pub matched_by: Option<i32>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateMatchDto {
    pub request_id: i32,
    pub driver_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct AutoMatchResultDto {
    pub requests_considered: u64,
    pub matches_created: u64,
    pub unfilled_requests: u64,
}
