use super::*;
use crate::{
    model::status::{DocumentType, VerificationAction, VerificationStatus},
    server::{
        model::driver::{LicenseParams, PersonalInfoParams},
        service::{
            kyc::{KycService, UploadedDocument},
            provider::{IdentityCheck, IdentityProvider, OcrProvider},
        },
    },
};
use chrono::{Duration, NaiveDate, Utc};
use test_utils::{builder::TestBuilder, factory};

struct StaticOcr;

#[async_trait]
impl OcrProvider for StaticOcr {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn extract_text(&self, _file_name: &str, _bytes: &[u8]) -> Result<String, ProviderError> {
        Ok("LICENCE LIC-0001".to_string())
    }
}

struct MismatchedIdentity;

#[async_trait]
impl IdentityProvider for MismatchedIdentity {
    fn name(&self) -> &'static str {
        "mismatch"
    }

    async fn verify_national_id(
        &self,
        _id_number: &str,
        _full_name: &str,
        _date_of_birth: Option<NaiveDate>,
    ) -> Result<IdentityCheck, ProviderError> {
        Ok(IdentityCheck {
            matched: false,
            detail: Some("Name differs".to_string()),
        })
    }
}

fn personal_info(date_of_birth: NaiveDate) -> PersonalInfoParams {
    PersonalInfoParams {
        date_of_birth,
        address: " 4 Allen Avenue ".to_string(),
        city: "Ikeja".to_string(),
        national_id_number: "NIN99887766".to_string(),
    }
}

fn license() -> LicenseParams {
    LicenseParams {
        license_number: "LIC-0001".to_string(),
        license_expiry: (Utc::now() + Duration::days(400)).date_naive(),
        vehicle_type: "sedan".to_string(),
        vehicle_plate: "lag-123-ab".to_string(),
    }
}

fn documents() -> Vec<UploadedDocument> {
    vec![
        UploadedDocument {
            document_type: DocumentType::NationalId,
            file_name: "nin.jpg".to_string(),
            bytes: vec![1, 2, 3],
        },
        UploadedDocument {
            document_type: DocumentType::DriversLicense,
            file_name: "licence.PDF".to_string(),
            bytes: vec![4, 5, 6],
        },
        UploadedDocument {
            document_type: DocumentType::Selfie,
            file_name: "me.png".to_string(),
            bytes: vec![7, 8, 9],
        },
    ]
}

/// Tests the full three-step KYC flow with OCR and an identity mismatch.
///
/// Expected: Ok, driver pending at step 3 with three stored files, OCR text on the
/// licence and the identity outcome in the log
#[tokio::test]
async fn completes_kyc_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let driver = factory::create_driver(db).await?;

    let providers = Providers {
        ocr: Some(Arc::new(StaticOcr)),
        identity: Some(Arc::new(MismatchedIdentity)),
        ..Providers::log_only()
    };
    let service = KycService::new(db, upload_dir.path(), &providers);

    let step1 = service
        .submit_personal_info(driver.id, personal_info(NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()))
        .await?;
    assert_eq!(step1.kyc_step, 1);
    assert_eq!(step1.address.as_deref(), Some("4 Allen Avenue"));

    let step2 = service.submit_license(driver.id, license()).await?;
    assert_eq!(step2.kyc_step, 2);
    assert_eq!(step2.vehicle_plate.as_deref(), Some("LAG-123-AB"));

    let detail = service.submit_documents(driver.id, documents()).await?;

    assert_eq!(detail.driver.kyc_step, 3);
    assert_eq!(detail.driver.verification_status, VerificationStatus::Pending);
    assert!(detail.driver.kyc_submitted_at.is_some());
    assert_eq!(detail.documents.len(), 3);
    for document in &detail.documents {
        assert!(std::path::Path::new(&document.file_path).exists());
    }
    let licence = detail
        .documents
        .iter()
        .find(|d| d.document_type == DocumentType::DriversLicense)
        .unwrap();
    assert_eq!(licence.ocr_text.as_deref(), Some("LICENCE LIC-0001"));

    let actions: Vec<_> = detail.verification_log.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![
            VerificationAction::PersonalInfoSubmitted,
            VerificationAction::LicenseSubmitted,
            VerificationAction::DocumentsSubmitted,
            VerificationAction::IdentityMismatch,
        ]
    );

    Ok(())
}

/// Tests that steps cannot be skipped.
///
/// Expected: Err(Conflict) for the licence before personal info and documents before licence
#[tokio::test]
async fn enforces_step_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let driver = factory::create_driver(db).await?;

    let providers = Providers::log_only();
    let service = KycService::new(db, upload_dir.path(), &providers);

    let license_first = service.submit_license(driver.id, license()).await;
    assert!(matches!(license_first, Err(AppError::Conflict(_))));

    service
        .submit_personal_info(driver.id, personal_info(NaiveDate::from_ymd_opt(1985, 1, 1).unwrap()))
        .await?;
    let documents_early = service.submit_documents(driver.id, documents()).await;
    assert!(matches!(documents_early, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that drivers under 18 are refused.
///
/// Expected: Err(Validation) and the driver still at step 0
#[tokio::test]
async fn rejects_underage_driver() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let driver = factory::create_driver(db).await?;

    let providers = Providers::log_only();
    let service = KycService::new(db, upload_dir.path(), &providers);
    let seventeen = Utc::now().date_naive() - Duration::days(17 * 365);

    let result = service
        .submit_personal_info(driver.id, personal_info(seventeen))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(service.status(driver.id).await?.driver.kyc_step, 0);

    Ok(())
}

/// Tests that every document type is required and nothing is stored otherwise.
///
/// Expected: Err(Validation) and no document rows
#[tokio::test]
async fn requires_all_documents() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let driver = factory::driver::DriverFactory::new(db)
        .with_kyc_details()
        .kyc_step(2)
        .build()
        .await?;

    let providers = Providers::log_only();
    let service = KycService::new(db, upload_dir.path(), &providers);
    let mut partial = documents();
    partial.retain(|d| d.document_type != DocumentType::Selfie);

    let result = service.submit_documents(driver.id, partial).await;

    assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("selfie")));
    assert!(service.status(driver.id).await?.documents.is_empty());

    Ok(())
}

/// Tests that KYC is locked while awaiting review.
///
/// Expected: Err(Conflict) for a pending driver
#[tokio::test]
async fn locks_pending_driver() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let driver = factory::driver::DriverFactory::new(db)
        .with_kyc_details()
        .kyc_step(3)
        .verification_status("pending")
        .build()
        .await?;

    let providers = Providers::log_only();
    let result = KycService::new(db, upload_dir.path(), &providers)
        .submit_license(driver.id, license())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that files written for a submission are removed when saving it fails.
///
/// Expected: Err(DbErr) and an empty upload directory for the driver
#[tokio::test]
async fn removes_written_files_when_submission_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .with_table(entity::prelude::DriverVerificationLog)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let driver = factory::driver::DriverFactory::new(db)
        .with_kyc_details()
        .kyc_step(2)
        .build()
        .await?;

    let providers = Providers::log_only();
    let result = KycService::new(db, upload_dir.path(), &providers)
        .submit_documents(driver.id, documents())
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
    let driver_dir = upload_dir
        .path()
        .join("drivers")
        .join(driver.id.to_string());
    let remaining = std::fs::read_dir(&driver_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(remaining, 0);

    Ok(())
}
