use chrono::{DateTime, Utc};

use crate::{
    model::{matching::MatchDto, status::MatchStatus},
    server::{error::AppError, util::parse::parse_stored},
};

/// Assignment of one driver to one company request.
#[derive(Debug, Clone)]
pub struct DriverMatch {
    pub id: i32,
    pub driver_id: i32,
    pub company_request_id: i32,
    pub status: MatchStatus,
    pub auto_matched: bool,
    pub matched_by: Option<i32>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DriverMatch {
    pub fn from_entity(entity: entity::driver_match::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            driver_id: entity.driver_id,
            company_request_id: entity.company_request_id,
            status: parse_stored(&entity.status)?,
            auto_matched: entity.auto_matched,
            matched_by: entity.matched_by,
            responded_at: entity.responded_at,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> MatchDto {
        MatchDto {
            id: self.id,
            driver_id: self.driver_id,
            company_request_id: self.company_request_id,
            status: self.status,
            auto_matched: self.auto_matched,
            matched_by: self.matched_by,
            responded_at: self.responded_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMatchParams {
    pub driver_id: i32,
    pub company_request_id: i32,
    pub auto_matched: bool,
    pub matched_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub company_request_id: Option<i32>,
    pub driver_id: Option<i32>,
}

/// Counters reported by an auto-match run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoMatchSummary {
    pub requests_considered: u64,
    pub matches_created: u64,
    pub unfilled_requests: u64,
}

impl AutoMatchSummary {
    pub fn into_dto(self) -> crate::model::matching::AutoMatchResultDto {
        crate::model::matching::AutoMatchResultDto {
            requests_considered: self.requests_considered,
            matches_created: self.matches_created,
            unfilled_requests: self.unfilled_requests,
        }
    }
}
