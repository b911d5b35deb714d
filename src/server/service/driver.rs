//! Admin-side driver management.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::{collections::BTreeSet, path::Path};

use crate::{
    model::{
        driver::BulkDriverAction,
        status::{DriverStatus, MatchStatus},
    },
    server::{
        data::{
            driver::DriverRepository, driver_document::DriverDocumentRepository,
            driver_match::DriverMatchRepository, verification_log::VerificationLogRepository,
        },
        error::AppError,
        model::{
            driver::{CreateDriverParams, Driver, DriverDetail, DriverFilter, UpdateDriverParams},
            page::Paginated,
        },
        service::company_request::refresh_request_status,
        util::{
            parse::{self, optional_text},
            password::{hash_password, validate_password},
            upload::remove_driver_documents,
        },
    },
};

/// Driver fields entered by an admin. The password is optional and plain text here.
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: Option<String>,
    pub city: Option<String>,
}

pub struct DriverService<'a> {
    db: &'a DatabaseConnection,
    upload_dir: &'a Path,
}

impl<'a> DriverService<'a> {
    pub fn new(db: &'a DatabaseConnection, upload_dir: &'a Path) -> Self {
        Self { db, upload_dir }
    }

    pub async fn get_paginated(
        &self,
        filter: DriverFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Driver>, AppError> {
        let filter = DriverFilter {
            search: optional_text(filter.search),
            ..filter
        };

        DriverRepository::new(self.db)
            .get_paginated(&filter, page, per_page)
            .await
    }

    /// Gets a driver with documents and verification log.
    pub async fn get(&self, id: i32) -> Result<DriverDetail, AppError> {
        get_detail(self.db, id).await
    }

    /// Creates a driver on behalf of an admin.
    ///
    /// # Returns
    /// - `Ok(Driver)` - Active, unverified driver at KYC step 0
    /// - `Err(AppError::Conflict)` - Email or phone already registered
    /// - `Err(AppError::Validation)` - Invalid name, email, phone or password
    pub async fn create(&self, params: NewDriver) -> Result<Driver, AppError> {
        let password_hash = match params.password.as_deref() {
            Some(password) if !password.is_empty() => {
                validate_password(password)?;
                Some(hash_password(password)?)
            }
            _ => None,
        };

        let params = validate_new_driver(
            self.db,
            CreateDriverParams {
                first_name: params.first_name,
                last_name: params.last_name,
                email: params.email,
                phone: params.phone,
                password_hash,
                city: params.city,
            },
        )
        .await?;

        DriverRepository::new(self.db).create(params).await
    }

    /// Updates profile, contact details and account status.
    pub async fn update(&self, params: UpdateDriverParams) -> Result<Driver, AppError> {
        let first_name = parse::required_text("first_name", params.first_name)?;
        let last_name = parse::required_text("last_name", params.last_name)?;
        let email = parse::email(params.email)?;
        let phone = parse::phone(params.phone)?;

        let repo = DriverRepository::new(self.db);
        if let Some(field) = repo
            .find_contact_conflict(&email, &phone, Some(params.id))
            .await?
        {
            return Err(AppError::Conflict(format!("{} is already registered", field)));
        }

        repo.update(UpdateDriverParams {
            id: params.id,
            first_name,
            last_name,
            email,
            phone,
            city: optional_text(params.city),
            status: params.status,
        })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", params.id)))
    }

    /// Deletes a driver and, best-effort, their stored documents.
    ///
    /// Requests the driver was matched to are recomputed in the same transaction.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let affected_requests = release_active_matches(&txn, &[id]).await?;
        if !DriverRepository::new(&txn).delete(id).await? {
            return Err(AppError::NotFound(format!("Driver {} not found", id)));
        }
        for request_id in affected_requests {
            refresh_request_status(&txn, request_id).await?;
        }
        txn.commit().await?;

        self.remove_documents(id).await;

        Ok(())
    }

    /// Applies one action to many drivers.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of drivers changed or deleted
    /// - `Err(AppError::Validation)` - No ids given
    pub async fn bulk(&self, action: BulkDriverAction, ids: Vec<i32>) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Err(AppError::Validation("ids must not be empty".to_string()));
        }

        let repo = DriverRepository::new(self.db);
        let affected = match action {
            BulkDriverAction::Activate => repo.set_status_many(&ids, DriverStatus::Active).await?,
            BulkDriverAction::Deactivate => {
                repo.set_status_many(&ids, DriverStatus::Inactive).await?
            }
            BulkDriverAction::Suspend => {
                repo.set_status_many(&ids, DriverStatus::Suspended).await?
            }
            BulkDriverAction::Delete => {
                let txn = self.db.begin().await?;
                let affected_requests = release_active_matches(&txn, &ids).await?;
                let deleted = DriverRepository::new(&txn).delete_many(&ids).await?;
                for request_id in affected_requests {
                    refresh_request_status(&txn, request_id).await?;
                }
                txn.commit().await?;
                for id in &ids {
                    self.remove_documents(*id).await;
                }
                deleted
            }
        };

        tracing::info!("Bulk {:?} affected {} driver(s)", action, affected);

        Ok(affected)
    }

    async fn remove_documents(&self, driver_id: i32) {
        if let Err(e) = remove_driver_documents(self.upload_dir, driver_id).await {
            tracing::warn!("Failed to remove documents of driver {}: {}", driver_id, e);
        }
    }
}

/// Cancels the active matches of `driver_ids` and returns the requests they belonged to.
async fn release_active_matches<C: ConnectionTrait>(
    db: &C,
    driver_ids: &[i32],
) -> Result<BTreeSet<i32>, AppError> {
    let match_repo = DriverMatchRepository::new(db);
    let mut affected_requests = BTreeSet::new();
    for driver_id in driver_ids {
        for driver_match in match_repo.get_active_for_driver(*driver_id).await? {
            match_repo
                .set_status(driver_match.id, MatchStatus::Cancelled, None)
                .await?;
            affected_requests.insert(driver_match.company_request_id);
        }
    }

    Ok(affected_requests)
}

/// Loads a driver with documents and verification log.
pub async fn get_detail(db: &DatabaseConnection, id: i32) -> Result<DriverDetail, AppError> {
    let driver = DriverRepository::new(db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", id)))?;

    Ok(DriverDetail {
        documents: DriverDocumentRepository::new(db).get_by_driver(id).await?,
        verification_log: VerificationLogRepository::new(db).get_by_driver(id).await?,
        driver,
    })
}

/// Normalizes a new driver's fields and rejects duplicate contacts.
pub async fn validate_new_driver(
    db: &DatabaseConnection,
    params: CreateDriverParams,
) -> Result<CreateDriverParams, AppError> {
    let params = CreateDriverParams {
        first_name: parse::required_text("first_name", params.first_name)?,
        last_name: parse::required_text("last_name", params.last_name)?,
        email: parse::email(params.email)?,
        phone: parse::phone(params.phone)?,
        password_hash: params.password_hash,
        city: optional_text(params.city),
    };

    if let Some(field) = DriverRepository::new(db)
        .find_contact_conflict(&params.email, &params.phone, None)
        .await?
    {
        return Err(AppError::Conflict(format!("{} is already registered", field)));
    }

    Ok(params)
}
