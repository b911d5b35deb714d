use chrono::{DateTime, Utc};

use crate::model::company::{CompanyDetailDto, CompanyDto};

#[derive(Debug, Clone)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn from_entity(entity: entity::company::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            address: entity.address,
            contact_person: entity.contact_person,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> CompanyDto {
        CompanyDto {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            contact_person: self.contact_person,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Company with counts of its requests.
#[derive(Debug, Clone)]
pub struct CompanyDetail {
    pub company: Company,
    pub request_count: u64,
    pub open_request_count: u64,
}

impl CompanyDetail {
    pub fn into_dto(self) -> CompanyDetailDto {
        CompanyDetailDto {
            company: self.company.into_dto(),
            request_count: self.request_count,
            open_request_count: self.open_request_count,
        }
    }
}

/// Editable company fields, used for both create and update.
#[derive(Debug, Clone)]
pub struct CompanyParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
}
