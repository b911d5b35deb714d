//! Company job request domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        request::{CompanyRequestDetailDto, CompanyRequestDto},
        status::RequestStatus,
    },
    server::{error::AppError, model::driver_match::DriverMatch, util::parse::parse_stored},
};

#[derive(Debug, Clone)]
pub struct CompanyRequest {
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

impl CompanyRequest {
    pub fn from_entity(entity: entity::company_request::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            company_id: entity.company_id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            vehicle_type: entity.vehicle_type,
            drivers_needed: entity.drivers_needed,
            status: parse_stored(&entity.status)?,
            start_date: entity.start_date,
            created_at: entity.created_at,
        })
    }

    /// Whether new matches may be attached to this request.
    pub fn accepts_matches(&self) -> bool {
        matches!(
            self.status,
            RequestStatus::Open | RequestStatus::PartiallyMatched
        )
    }

    pub fn into_dto(self) -> CompanyRequestDto {
        CompanyRequestDto {
            id: self.id,
            company_id: self.company_id,
            title: self.title,
            description: self.description,
            location: self.location,
            vehicle_type: self.vehicle_type,
            drivers_needed: self.drivers_needed,
            status: self.status,
            start_date: self.start_date,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompanyRequestDetail {
    pub request: CompanyRequest,
    pub matches: Vec<DriverMatch>,
}

impl CompanyRequestDetail {
    pub fn into_dto(self) -> CompanyRequestDetailDto {
        CompanyRequestDetailDto {
            request: self.request.into_dto(),
            matches: self
                .matches
                .into_iter()
                .map(DriverMatch::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCompanyRequestParams {
    pub company_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub vehicle_type: Option<String>,
    pub drivers_needed: i32,
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct UpdateCompanyRequestParams {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub vehicle_type: Option<String>,
    pub drivers_needed: i32,
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyRequestFilter {
    pub company_id: Option<i32>,
    pub status: Option<RequestStatus>,
}
