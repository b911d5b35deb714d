use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::{DocumentType, DriverStatus, VerificationAction, VerificationStatus};

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct DriverDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
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
    pub phone_verified: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct DriverDocumentDto {
    pub id: i32,
    pub document_type: DocumentType,
    pub original_name: String,
    pub ocr_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct VerificationLogDto {
    pub id: i32,
    pub admin_user_id: Option<i32>,
    pub action: VerificationAction,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Driver with uploaded documents and the verification audit trail.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct DriverDetailDto {
    pub driver: DriverDto,
    pub documents: Vec<DriverDocumentDto>,
    pub verification_log: Vec<VerificationLogDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateDriverDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: Option<String>,
    pub city: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UpdateDriverDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    pub status: DriverStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BulkDriverAction {
    Activate,
    Deactivate,
    Suspend,
    Delete,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct BulkDriverActionDto {
    pub action: BulkDriverAction,
    pub ids: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct RegisterDriverDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct DriverLoginDto {
    pub phone: String,
    pub password: String,
}

/// Newly registered driver with the phone code that was sent to them.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct RegisteredDriverDto {
    pub driver: DriverDto,
    pub otp: crate::model::otp::OtpIssuedDto,
}
