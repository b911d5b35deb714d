use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{driver::DriverDocumentDto, status::VerificationStatus};

/// KYC step 1.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct KycPersonalInfoDto {
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub city: String,
    pub national_id_number: String,
}

/// KYC step 2.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct KycLicenseDto {
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub vehicle_type: String,
    pub vehicle_plate: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct KycStatusDto {
    pub kyc_step: i32,
    pub verification_status: VerificationStatus,
    pub rejection_reason: Option<String>,
    pub kyc_submitted_at: Option<DateTime<Utc>>,
    pub documents: Vec<DriverDocumentDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ApproveDriverDto {
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct RejectDriverDto {
    pub password: String,
    pub reason: String,
}

/// KYC step 3 upload form, one file per document type.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct KycDocumentsForm {
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub national_id: String,
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub drivers_license: String,
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub selfie: String,
}
