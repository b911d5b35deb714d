//! Driver KYC workflow.
//!
//! Step 1 stores personal details, step 2 licence and vehicle, step 3 the three documents.
//! Step N requires `kyc_step >= N - 1`. Steps can be resubmitted until the documents are in;
//! from then on the driver is `pending` and locked until an admin decides.

use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::path::{Path, PathBuf};

use crate::{
    model::status::{DocumentType, VerificationAction, VerificationStatus},
    server::{
        data::{
            driver::DriverRepository, driver_document::DriverDocumentRepository,
            verification_log::VerificationLogRepository,
        },
        error::AppError,
        model::driver::{
            Driver, DriverDetail, LicenseParams, NewDocumentParams, PersonalInfoParams,
        },
        service::{driver::get_detail, provider::Providers},
        util::{
            parse::required_text,
            upload::{store_document, validate_document},
        },
    },
};

pub const MINIMUM_AGE: i32 = 18;

/// A file taken from the multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub document_type: DocumentType,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct KycService<'a> {
    db: &'a DatabaseConnection,
    upload_dir: &'a Path,
    providers: &'a Providers,
}

impl<'a> KycService<'a> {
    pub fn new(db: &'a DatabaseConnection, upload_dir: &'a Path, providers: &'a Providers) -> Self {
        Self {
            db,
            upload_dir,
            providers,
        }
    }

    pub async fn status(&self, driver_id: i32) -> Result<DriverDetail, AppError> {
        get_detail(self.db, driver_id).await
    }

    /// Saves step 1.
    ///
    /// # Returns
    /// - `Ok(Driver)` - Updated driver, `kyc_step` at least 1
    /// - `Err(AppError::Conflict)` - Driver is pending or verified
    /// - `Err(AppError::Validation)` - Under 18, birth date in the future, or blank fields
    pub async fn submit_personal_info(
        &self,
        driver_id: i32,
        params: PersonalInfoParams,
    ) -> Result<Driver, AppError> {
        let driver = self.find_editable(driver_id, 1).await?;

        let today = Utc::now().date_naive();
        if age_on(params.date_of_birth, today) < MINIMUM_AGE {
            return Err(AppError::Validation(format!(
                "Drivers must be at least {} years old",
                MINIMUM_AGE
            )));
        }

        let params = PersonalInfoParams {
            date_of_birth: params.date_of_birth,
            address: required_text("address", params.address)?,
            city: required_text("city", params.city)?,
            national_id_number: required_text("national_id_number", params.national_id_number)?,
        };

        let txn = self.db.begin().await?;
        let updated = DriverRepository::new(&txn)
            .save_personal_info(driver.id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver.id)))?;
        VerificationLogRepository::new(&txn)
            .append(driver.id, None, VerificationAction::PersonalInfoSubmitted, None)
            .await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Saves step 2.
    ///
    /// # Returns
    /// - `Ok(Driver)` - Updated driver, `kyc_step` at least 2
    /// - `Err(AppError::Conflict)` - Step 1 missing, or driver is pending or verified
    /// - `Err(AppError::Validation)` - Licence already expired or blank fields
    pub async fn submit_license(
        &self,
        driver_id: i32,
        params: LicenseParams,
    ) -> Result<Driver, AppError> {
        let driver = self.find_editable(driver_id, 2).await?;

        if params.license_expiry <= Utc::now().date_naive() {
            return Err(AppError::Validation(
                "license_expiry must be in the future".to_string(),
            ));
        }

        let params = LicenseParams {
            license_number: required_text("license_number", params.license_number)?,
            license_expiry: params.license_expiry,
            vehicle_type: required_text("vehicle_type", params.vehicle_type)?,
            vehicle_plate: required_text("vehicle_plate", params.vehicle_plate)?.to_uppercase(),
        };

        let txn = self.db.begin().await?;
        let updated = DriverRepository::new(&txn)
            .save_license(driver.id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver.id)))?;
        VerificationLogRepository::new(&txn)
            .append(driver.id, None, VerificationAction::LicenseSubmitted, None)
            .await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Stores the three KYC documents and moves the driver to `pending`.
    ///
    /// OCR of the licence and the national id check run when configured. Their failures
    /// are logged and never fail the submission.
    ///
    /// # Returns
    /// - `Ok(DriverDetail)` - Driver with the stored documents
    /// - `Err(AppError::Validation)` - A document missing, duplicated, empty, too large or
    ///   of a disallowed type
    /// - `Err(AppError::Conflict)` - Step 2 missing, or driver is pending or verified
    pub async fn submit_documents(
        &self,
        driver_id: i32,
        documents: Vec<UploadedDocument>,
    ) -> Result<DriverDetail, AppError> {
        let driver = self.find_editable(driver_id, 3).await?;

        let mut extensions = Vec::with_capacity(documents.len());
        for &document_type in DocumentType::ALL {
            let matching: Vec<_> = documents
                .iter()
                .filter(|d| d.document_type == document_type)
                .collect();
            match matching.as_slice() {
                [] => {
                    return Err(AppError::Validation(format!("{} is required", document_type)));
                }
                [document] => extensions.push((
                    document_type,
                    validate_document(document_type, &document.file_name, document.bytes.len())?,
                )),
                _ => {
                    return Err(AppError::Validation(format!(
                        "{} was uploaded more than once",
                        document_type
                    )));
                }
            }
        }

        let mut written = Vec::with_capacity(documents.len());
        let replaced = match self
            .persist_documents(&driver, &documents, &extensions, &mut written)
            .await
        {
            Ok(replaced) => replaced,
            Err(e) => {
                for path in &written {
                    if let Err(remove_err) = tokio::fs::remove_file(path).await {
                        tracing::warn!(
                            "Failed to remove unsaved document {}: {}",
                            path.display(),
                            remove_err
                        );
                    }
                }
                return Err(e);
            }
        };

        for path in replaced {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!("Failed to remove replaced document {}: {}", path, e);
            }
        }

        tracing::info!("Driver {} submitted KYC documents", driver.id);

        get_detail(self.db, driver.id).await
    }

    /// Writes the documents to disk and records them with the submission in one transaction.
    ///
    /// Paths are pushed to `written` as files land so the caller can remove them on failure.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Paths of the documents replaced by this submission
    async fn persist_documents(
        &self,
        driver: &Driver,
        documents: &[UploadedDocument],
        extensions: &[(DocumentType, String)],
        written: &mut Vec<PathBuf>,
    ) -> Result<Vec<String>, AppError> {
        let mut new_documents = Vec::with_capacity(documents.len());
        for document in documents {
            let Some((_, extension)) = extensions
                .iter()
                .find(|(t, _)| *t == document.document_type)
            else {
                continue;
            };

            let path = store_document(
                self.upload_dir,
                driver.id,
                document.document_type,
                extension,
                &document.bytes,
            )
            .await?;
            written.push(path.clone());

            let ocr_text = match document.document_type {
                DocumentType::DriversLicense => self.extract_text(document).await,
                _ => None,
            };

            new_documents.push(NewDocumentParams {
                driver_id: driver.id,
                document_type: document.document_type,
                file_path: path.to_string_lossy().into_owned(),
                original_name: document.file_name.clone(),
                ocr_text,
            });
        }

        let identity_log = self.check_identity(driver).await;

        let txn = self.db.begin().await?;
        let document_repo = DriverDocumentRepository::new(&txn);
        let replaced = document_repo
            .delete_by_driver_and_types(driver.id, DocumentType::ALL)
            .await?;
        for params in new_documents {
            document_repo.create(params).await?;
        }

        let log_repo = VerificationLogRepository::new(&txn);
        log_repo
            .append(driver.id, None, VerificationAction::DocumentsSubmitted, None)
            .await?;
        if let Some((action, note)) = identity_log {
            log_repo.append(driver.id, None, action, note).await?;
        }

        DriverRepository::new(&txn)
            .mark_kyc_submitted(driver.id, Utc::now())
            .await?;
        txn.commit().await?;

        Ok(replaced)
    }

    /// Loads a driver allowed to submit `step`.
    async fn find_editable(&self, driver_id: i32, step: i32) -> Result<Driver, AppError> {
        let driver = DriverRepository::new(self.db)
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver_id)))?;

        match driver.verification_status {
            VerificationStatus::Pending => {
                return Err(AppError::Conflict(
                    "KYC is awaiting review and cannot be changed".to_string(),
                ))
            }
            VerificationStatus::Verified => {
                return Err(AppError::Conflict("Driver is already verified".to_string()))
            }
            VerificationStatus::Unverified | VerificationStatus::Rejected => {}
        }

        if driver.kyc_step < step - 1 {
            return Err(AppError::Conflict(format!(
                "Complete KYC step {} first",
                driver.kyc_step + 1
            )));
        }

        Ok(driver)
    }

    async fn extract_text(&self, document: &UploadedDocument) -> Option<String> {
        let ocr = self.providers.ocr.as_ref()?;

        match ocr.extract_text(&document.file_name, &document.bytes).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("OCR failed for {}: {}", document.file_name, e);
                None
            }
        }
    }

    /// Runs the national id check and returns the log entry to record, if any.
    async fn check_identity(
        &self,
        driver: &Driver,
    ) -> Option<(VerificationAction, Option<String>)> {
        let identity = self.providers.identity.as_ref()?;
        let id_number = driver.national_id_number.as_deref()?;

        let entry = match identity
            .verify_national_id(id_number, &driver.full_name(), driver.date_of_birth)
            .await
        {
            Ok(check) if check.matched => (VerificationAction::IdentityVerified, check.detail),
            Ok(check) => (VerificationAction::IdentityMismatch, check.detail),
            Err(e) => {
                tracing::warn!("Identity check failed for driver {}: {}", driver.id, e);
                (VerificationAction::IdentityCheckFailed, Some(e.to_string()))
            }
        };

        Some(entry)
    }
}

/// Whole years between `date_of_birth` and `today`. Negative for future birth dates.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}
