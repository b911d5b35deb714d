use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CompanyDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CompanyDetailDto {
    pub company: CompanyDto,
    pub request_count: u64,
    pub open_request_count: u64,
}

/// Body for both creating and updating a company.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CompanyFormDto {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
}
