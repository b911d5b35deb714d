use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{matching::MatchDto, status::RequestStatus};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CompanyRequestDto {
    pub id: i32,
    pub company_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub vehicle_type: Option<String>,
    pub drivers_needed: i32,
    pub status: RequestStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CompanyRequestDetailDto {
    pub request: CompanyRequestDto,
    pub matches: Vec<MatchDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateCompanyRequestDto {
    pub company_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub vehicle_type: Option<String>,
    pub drivers_needed: i32,
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UpdateCompanyRequestDto {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub vehicle_type: Option<String>,
    pub drivers_needed: i32,
    pub start_date: Option<DateTime<Utc>>,
}
