//! Driver domain models and parameters.
//!
//! A driver moves through KYC (`kyc_step` 0 to 3) and verification
//! (`unverified` → `pending` → `verified` / `rejected`) while administrators separately
//! control the account `status`.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::{
        driver::{DriverDetailDto, DriverDocumentDto, DriverDto, VerificationLogDto},
        kyc::KycStatusDto,
        status::{DocumentType, DriverStatus, VerificationAction, VerificationStatus},
    },
    server::{error::AppError, model::notification::Recipient, util::parse::parse_stored},
};

#[derive(Debug, Clone)]
pub struct Driver {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: Option<String>,
    pub status: DriverStatus,
    pub verification_status: VerificationStatus,
    pub kyc_step: i32,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub national_id_number: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub vehicle_type: Option<String>,
    pub vehicle_plate: Option<String>,
    pub kyc_submitted_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<i32>,
    pub phone_verified_at: Option<DateTime<Utc>>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    /// Converts an entity model to the driver domain model.
    ///
    /// # Returns
    /// - `Ok(Driver)` - The converted domain model
    /// - `Err(AppError::InternalErr(UnknownStoredValue))` - Status column holds an unknown value
    pub fn from_entity(entity: entity::driver::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone: entity.phone,
            password_hash: entity.password_hash,
            status: parse_stored(&entity.status)?,
            verification_status: parse_stored(&entity.verification_status)?,
            kyc_step: entity.kyc_step,
            date_of_birth: entity.date_of_birth,
            address: entity.address,
            city: entity.city,
            national_id_number: entity.national_id_number,
            license_number: entity.license_number,
            license_expiry: entity.license_expiry,
            vehicle_type: entity.vehicle_type,
            vehicle_plate: entity.vehicle_plate,
            kyc_submitted_at: entity.kyc_submitted_at,
            rejection_reason: entity.rejection_reason,
            verified_at: entity.verified_at,
            verified_by: entity.verified_by,
            phone_verified_at: entity.phone_verified_at,
            email_verified_at: entity.email_verified_at,
            created_at: entity.created_at,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn recipient(&self) -> Recipient {
        Recipient {
            phone: Some(self.phone.clone()),
            email: Some(self.email.clone()),
        }
    }

    pub fn into_dto(self) -> DriverDto {
        DriverDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            status: self.status,
            verification_status: self.verification_status,
            kyc_step: self.kyc_step,
            date_of_birth: self.date_of_birth,
            address: self.address,
            city: self.city,
            national_id_number: self.national_id_number,
            license_number: self.license_number,
            license_expiry: self.license_expiry,
            vehicle_type: self.vehicle_type,
            vehicle_plate: self.vehicle_plate,
            kyc_submitted_at: self.kyc_submitted_at,
            rejection_reason: self.rejection_reason,
            verified_at: self.verified_at,
            verified_by: self.verified_by,
            phone_verified: self.phone_verified_at.is_some(),
            email_verified: self.email_verified_at.is_some(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DriverDocument {
    pub id: i32,
    pub driver_id: i32,
    pub document_type: DocumentType,
    pub file_path: String,
    pub original_name: String,
    pub ocr_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DriverDocument {
    pub fn from_entity(entity: entity::driver_document::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            driver_id: entity.driver_id,
            document_type: parse_stored(&entity.document_type)?,
            file_path: entity.file_path,
            original_name: entity.original_name,
            ocr_text: entity.ocr_text,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> DriverDocumentDto {
        DriverDocumentDto {
            id: self.id,
            document_type: self.document_type,
            original_name: self.original_name,
            ocr_text: self.ocr_text,
            created_at: self.created_at,
        }
    }
}

/// One row of the verification audit trail.
#[derive(Debug, Clone)]
pub struct VerificationLogEntry {
    pub id: i32,
    pub driver_id: i32,
    pub admin_user_id: Option<i32>,
    pub action: VerificationAction,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VerificationLogEntry {
    pub fn from_entity(entity: entity::driver_verification_log::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            driver_id: entity.driver_id,
            admin_user_id: entity.admin_user_id,
            action: parse_stored(&entity.action)?,
            note: entity.note,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> VerificationLogDto {
        VerificationLogDto {
            id: self.id,
            admin_user_id: self.admin_user_id,
            action: self.action,
            note: self.note,
            created_at: self.created_at,
        }
    }
}

/// Driver with documents and audit trail, returned by the admin detail endpoint.
#[derive(Debug, Clone)]
pub struct DriverDetail {
    pub driver: Driver,
    pub documents: Vec<DriverDocument>,
    pub verification_log: Vec<VerificationLogEntry>,
}

impl DriverDetail {
    pub fn into_dto(self) -> DriverDetailDto {
        DriverDetailDto {
            driver: self.driver.into_dto(),
            documents: self
                .documents
                .into_iter()
                .map(DriverDocument::into_dto)
                .collect(),
            verification_log: self
                .verification_log
                .into_iter()
                .map(VerificationLogEntry::into_dto)
                .collect(),
        }
    }

    pub fn into_kyc_dto(self) -> KycStatusDto {
        KycStatusDto {
            kyc_step: self.driver.kyc_step,
            verification_status: self.driver.verification_status,
            rejection_reason: self.driver.rejection_reason,
            kyc_submitted_at: self.driver.kyc_submitted_at,
            documents: self
                .documents
                .into_iter()
                .map(DriverDocument::into_dto)
                .collect(),
        }
    }
}

/// Parameters for creating a driver. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct CreateDriverParams {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateDriverParams {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    pub status: DriverStatus,
}

/// Filters for the admin driver listing. All filters combine with AND.
#[derive(Debug, Clone, Default)]
pub struct DriverFilter {
    /// Substring match on first name, last name, email or phone.
    pub search: Option<String>,
    pub status: Option<DriverStatus>,
    pub verification_status: Option<VerificationStatus>,
    /// `Some(true)` keeps only drivers available for matching, `Some(false)` the rest.
    pub available: Option<bool>,
}

/// KYC step 1 values.
#[derive(Debug, Clone)]
pub struct PersonalInfoParams {
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub city: String,
    pub national_id_number: String,
}

/// KYC step 2 values.
#[derive(Debug, Clone)]
pub struct LicenseParams {
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub vehicle_type: String,
    pub vehicle_plate: String,
}

/// A stored KYC document awaiting its database row.
#[derive(Debug, Clone)]
pub struct NewDocumentParams {
    pub driver_id: i32,
    pub document_type: DocumentType,
    pub file_path: String,
    pub original_name: String,
    pub ocr_text: Option<String>,
}
