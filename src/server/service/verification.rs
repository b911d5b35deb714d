//! Admin verification decisions on submitted KYC.
//!
//! Both decisions require the acting admin to re-enter their password.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::BTreeSet;

use crate::{
    model::status::{MatchStatus, VerificationAction, VerificationStatus},
    server::{
        data::{
            driver::DriverRepository, driver_match::DriverMatchRepository,
            verification_log::VerificationLogRepository,
        },
        error::{auth::AuthError, AppError},
        model::{admin::AdminUser, driver::Driver},
        service::{
            company_request::refresh_request_status,
            notification::{
                variables, Notifier, DRIVER_APPROVED_TEMPLATE, DRIVER_REJECTED_TEMPLATE,
            },
        },
        util::{parse::required_text, password::verify_password},
    },
};

pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a Notifier,
}

impl<'a> VerificationService<'a> {
    pub fn new(db: &'a DatabaseConnection, notifier: &'a Notifier) -> Self {
        Self { db, notifier }
    }

    /// Approves a pending driver.
    ///
    /// # Returns
    /// - `Ok(Driver)` - The verified driver
    /// - `Err(AuthError::PasswordConfirmationFailed)` - Password does not match
    /// - `Err(AppError::NotFound)` - Driver does not exist
    /// - `Err(AppError::Conflict)` - Driver is not pending
    pub async fn approve(
        &self,
        admin: &AdminUser,
        driver_id: i32,
        password: &str,
    ) -> Result<Driver, AppError> {
        confirm_password(admin, password)?;

        let txn = self.db.begin().await?;
        let driver_repo = DriverRepository::new(&txn);
        let driver = driver_repo
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver_id)))?;
        if driver.verification_status != VerificationStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Driver {} is {} and cannot be approved",
                driver.id, driver.verification_status
            )));
        }

        let driver = driver_repo
            .approve(driver.id, admin.id, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver_id)))?;
        VerificationLogRepository::new(&txn)
            .append(driver.id, Some(admin.id), VerificationAction::Approved, None)
            .await?;
        txn.commit().await?;

        tracing::info!("Admin {} approved driver {}", admin.id, driver.id);
        self.notifier.dispatch(
            DRIVER_APPROVED_TEMPLATE,
            driver.recipient(),
            variables([("name", driver.first_name.clone())]),
        );

        Ok(driver)
    }

    /// Rejects a pending or verified driver and cancels their active matches.
    ///
    /// KYC restarts from step 0 after a rejection.
    ///
    /// # Returns
    /// - `Ok(Driver)` - The rejected driver
    /// - `Err(AuthError::PasswordConfirmationFailed)` - Password does not match
    /// - `Err(AppError::Validation)` - Blank reason
    /// - `Err(AppError::Conflict)` - Driver is neither pending nor verified
    pub async fn reject(
        &self,
        admin: &AdminUser,
        driver_id: i32,
        password: &str,
        reason: String,
    ) -> Result<Driver, AppError> {
        confirm_password(admin, password)?;
        let reason = required_text("reason", reason)?;

        let txn = self.db.begin().await?;
        let driver_repo = DriverRepository::new(&txn);
        let driver = driver_repo
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver_id)))?;
        if !matches!(
            driver.verification_status,
            VerificationStatus::Pending | VerificationStatus::Verified
        ) {
            return Err(AppError::Conflict(format!(
                "Driver {} is {} and cannot be rejected",
                driver.id, driver.verification_status
            )));
        }

        let driver = driver_repo
            .reject(driver.id, reason.clone())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver_id)))?;
        VerificationLogRepository::new(&txn)
            .append(
                driver.id,
                Some(admin.id),
                VerificationAction::Rejected,
                Some(reason.clone()),
            )
            .await?;

        let match_repo = DriverMatchRepository::new(&txn);
        let mut affected_requests = BTreeSet::new();
        for driver_match in match_repo.get_active_for_driver(driver.id).await? {
            match_repo
                .set_status(driver_match.id, MatchStatus::Cancelled, None)
                .await?;
            affected_requests.insert(driver_match.company_request_id);
        }
        for request_id in &affected_requests {
            refresh_request_status(&txn, *request_id).await?;
        }
        txn.commit().await?;

        tracing::info!(
            "Admin {} rejected driver {}, {} requests affected",
            admin.id,
            driver.id,
            affected_requests.len()
        );
        self.notifier.dispatch(
            DRIVER_REJECTED_TEMPLATE,
            driver.recipient(),
            variables([
                ("name", driver.first_name.clone()),
                ("reason", reason),
            ]),
        );

        Ok(driver)
    }
}

fn confirm_password(admin: &AdminUser, password: &str) -> Result<(), AuthError> {
    if verify_password(password, &admin.password_hash) {
        Ok(())
    } else {
        Err(AuthError::PasswordConfirmationFailed(admin.id))
    }
}
