//! Driver to request matching.
//!
//! A driver is available when active, verified and holding no pending or accepted match.
//! Every match change is followed by a status refresh of the affected request.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::VecDeque;

use crate::{
    model::status::MatchStatus,
    server::{
        data::{
            company_request::CompanyRequestRepository, driver::DriverRepository,
            driver_match::DriverMatchRepository,
        },
        error::AppError,
        model::{
            company_request::CompanyRequest,
            driver::Driver,
            driver_match::{AutoMatchSummary, CreateMatchParams, DriverMatch, MatchFilter},
            page::Paginated,
        },
        service::{
            company_request::refresh_request_status,
            notification::{variables, Notifier, MATCH_ASSIGNED_TEMPLATE},
        },
    },
};

pub struct MatchingService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a Notifier,
}

impl<'a> MatchingService<'a> {
    pub fn new(db: &'a DatabaseConnection, notifier: &'a Notifier) -> Self {
        Self { db, notifier }
    }

    pub async fn get_paginated(
        &self,
        filter: MatchFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<DriverMatch>, AppError> {
        DriverMatchRepository::new(self.db)
            .get_paginated(&filter, page, per_page)
            .await
    }

    /// Gets every match of one driver, newest first.
    pub async fn get_for_driver(&self, driver_id: i32) -> Result<Vec<DriverMatch>, AppError> {
        DriverMatchRepository::new(self.db)
            .get_by_driver(driver_id)
            .await
    }

    /// Assigns a driver to a request by hand.
    ///
    /// # Returns
    /// - `Ok(DriverMatch)` - The new pending match
    /// - `Err(AppError::NotFound)` - Request or driver does not exist
    /// - `Err(AppError::Conflict)` - Request is not accepting matches or is full, or the
    ///   driver is not available
    pub async fn create_manual(
        &self,
        admin_id: i32,
        request_id: i32,
        driver_id: i32,
    ) -> Result<DriverMatch, AppError> {
        let txn = self.db.begin().await?;

        let request = CompanyRequestRepository::new(&txn)
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;
        if !request.accepts_matches() {
            return Err(AppError::Conflict(format!(
                "Request {} is {} and does not accept matches",
                request.id, request.status
            )));
        }

        let match_repo = DriverMatchRepository::new(&txn);
        let active = match_repo.count_active_for_request(request.id).await?;
        if active >= request.drivers_needed.max(0) as u64 {
            return Err(AppError::Conflict(format!(
                "Request {} has no free slot",
                request.id
            )));
        }

        let driver_repo = DriverRepository::new(&txn);
        let driver = driver_repo
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Driver {} not found", driver_id)))?;
        if !driver_repo.is_available(driver.id).await? {
            return Err(AppError::Conflict(format!(
                "Driver {} is not available for matching",
                driver.id
            )));
        }

        let driver_match = match_repo
            .create(CreateMatchParams {
                driver_id: driver.id,
                company_request_id: request.id,
                auto_matched: false,
                matched_by: Some(admin_id),
            })
            .await?;
        refresh_request_status(&txn, request.id).await?;
        txn.commit().await?;

        tracing::info!(
            "Admin {} matched driver {} to request {}",
            admin_id,
            driver.id,
            request.id
        );
        self.notify_assigned(&driver, &request);

        Ok(driver_match)
    }

    /// Fills open requests, oldest first, with available drivers in id order.
    ///
    /// Runs in one transaction. Drivers are handed out from the front of the queue until
    /// it is empty; requests left with free slots are counted as unfilled.
    pub async fn auto_match(&self, matched_by: Option<i32>) -> Result<AutoMatchSummary, AppError> {
        let txn = self.db.begin().await?;

        let requests = CompanyRequestRepository::new(&txn).get_matchable().await?;
        let mut drivers: VecDeque<Driver> = DriverRepository::new(&txn)
            .get_available()
            .await?
            .into();

        let match_repo = DriverMatchRepository::new(&txn);
        let mut summary = AutoMatchSummary {
            requests_considered: requests.len() as u64,
            ..Default::default()
        };
        let mut assigned = Vec::new();

        for request in requests {
            let active = match_repo.count_active_for_request(request.id).await?;
            let mut free = (request.drivers_needed.max(0) as u64).saturating_sub(active);

            while free > 0 {
                let Some(driver) = drivers.pop_front() else {
                    break;
                };

                match_repo
                    .create(CreateMatchParams {
                        driver_id: driver.id,
                        company_request_id: request.id,
                        auto_matched: true,
                        matched_by,
                    })
                    .await?;
                summary.matches_created += 1;
                free -= 1;
                assigned.push((driver, request.clone()));
            }

            if free > 0 {
                summary.unfilled_requests += 1;
            }

            refresh_request_status(&txn, request.id).await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Auto-match considered {} requests, created {} matches, {} left unfilled",
            summary.requests_considered,
            summary.matches_created,
            summary.unfilled_requests
        );

        for (driver, request) in &assigned {
            self.notify_assigned(driver, request);
        }

        Ok(summary)
    }

    /// Records a driver's answer to a pending match.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Match does not exist or belongs to another driver
    /// - `Err(AppError::Conflict)` - Match is no longer pending
    pub async fn respond(
        &self,
        driver_id: i32,
        match_id: i32,
        accept: bool,
    ) -> Result<DriverMatch, AppError> {
        let txn = self.db.begin().await?;

        let match_repo = DriverMatchRepository::new(&txn);
        let driver_match = match_repo
            .find_by_id(match_id)
            .await?
            .filter(|m| m.driver_id == driver_id)
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))?;
        if driver_match.status != MatchStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Match {} is already {}",
                driver_match.id, driver_match.status
            )));
        }

        let status = if accept {
            MatchStatus::Accepted
        } else {
            MatchStatus::Declined
        };
        let updated = match_repo
            .set_status(driver_match.id, status, Some(Utc::now()))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))?;
        refresh_request_status(&txn, updated.company_request_id).await?;
        txn.commit().await?;

        tracing::info!("Driver {} {} match {}", driver_id, status, match_id);

        Ok(updated)
    }

    /// Cancels a pending or accepted match.
    pub async fn cancel(&self, match_id: i32) -> Result<DriverMatch, AppError> {
        self.transition(match_id, MatchStatus::Cancelled, MatchStatus::is_active)
            .await
    }

    /// Completes an accepted match.
    pub async fn complete(&self, match_id: i32) -> Result<DriverMatch, AppError> {
        self.transition(match_id, MatchStatus::Completed, |s| {
            *s == MatchStatus::Accepted
        })
        .await
    }

    async fn transition(
        &self,
        match_id: i32,
        to: MatchStatus,
        allowed: impl Fn(&MatchStatus) -> bool,
    ) -> Result<DriverMatch, AppError> {
        let txn = self.db.begin().await?;

        let match_repo = DriverMatchRepository::new(&txn);
        let driver_match = match_repo
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))?;
        if !allowed(&driver_match.status) {
            return Err(AppError::Conflict(format!(
                "Match {} is {} and cannot be marked {}",
                driver_match.id, driver_match.status, to
            )));
        }

        let updated = match_repo
            .set_status(driver_match.id, to, None)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))?;
        refresh_request_status(&txn, updated.company_request_id).await?;
        txn.commit().await?;

        Ok(updated)
    }

    fn notify_assigned(&self, driver: &Driver, request: &CompanyRequest) {
        self.notifier.dispatch(
            MATCH_ASSIGNED_TEMPLATE,
            driver.recipient(),
            variables([
                ("name", driver.first_name.clone()),
                ("request_title", request.title.clone()),
                ("location", request.location.clone()),
            ]),
        );
    }
}
