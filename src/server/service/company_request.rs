//! Company job requests and their status bookkeeping.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::status::{MatchStatus, RequestStatus},
    server::{
        data::{
            company::CompanyRepository, company_request::CompanyRequestRepository,
            driver_match::DriverMatchRepository,
        },
        error::AppError,
        model::{
            company_request::{
                CompanyRequest, CompanyRequestDetail, CompanyRequestFilter,
                CreateCompanyRequestParams, UpdateCompanyRequestParams,
            },
            page::Paginated,
        },
        util::parse::{optional_text, required_text},
    },
};

pub struct CompanyRequestService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompanyRequestService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: CompanyRequestFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<CompanyRequest>, AppError> {
        CompanyRequestRepository::new(self.db)
            .get_paginated(&filter, page, per_page)
            .await
    }

    /// Gets a request together with all of its matches.
    pub async fn get(&self, id: i32) -> Result<CompanyRequestDetail, AppError> {
        let request = find_request(self.db, id).await?;
        let matches = DriverMatchRepository::new(self.db)
            .get_by_request(id)
            .await?;

        Ok(CompanyRequestDetail { request, matches })
    }

    /// Creates an open request.
    ///
    /// # Returns
    /// - `Ok(CompanyRequest)` - The new request
    /// - `Err(AppError::NotFound)` - Company does not exist
    /// - `Err(AppError::Conflict)` - Company is inactive
    /// - `Err(AppError::Validation)` - Blank title/location or `drivers_needed < 1`
    pub async fn create(
        &self,
        params: CreateCompanyRequestParams,
    ) -> Result<CompanyRequest, AppError> {
        let company = CompanyRepository::new(self.db)
            .find_by_id(params.company_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Company {} not found", params.company_id))
            })?;
        if !company.is_active {
            return Err(AppError::Conflict(format!(
                "Company {} is inactive",
                company.name
            )));
        }

        let params = CreateCompanyRequestParams {
            company_id: params.company_id,
            title: required_text("title", params.title)?,
            description: optional_text(params.description),
            location: required_text("location", params.location)?,
            vehicle_type: optional_text(params.vehicle_type),
            drivers_needed: validate_drivers_needed(params.drivers_needed)?,
            start_date: params.start_date,
        };

        let request = CompanyRequestRepository::new(self.db).create(params).await?;
        tracing::info!(
            "Created request {} for company {} ({} drivers)",
            request.id,
            request.company_id,
            request.drivers_needed
        );

        Ok(request)
    }

    /// Updates an unfinished request and recomputes its status against `drivers_needed`.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Request is completed or cancelled
    pub async fn update(
        &self,
        params: UpdateCompanyRequestParams,
    ) -> Result<CompanyRequest, AppError> {
        let existing = find_request(self.db, params.id).await?;
        if existing.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Request {} is {} and can no longer be edited",
                existing.id, existing.status
            )));
        }

        let params = UpdateCompanyRequestParams {
            id: params.id,
            title: required_text("title", params.title)?,
            description: optional_text(params.description),
            location: required_text("location", params.location)?,
            vehicle_type: optional_text(params.vehicle_type),
            drivers_needed: validate_drivers_needed(params.drivers_needed)?,
            start_date: params.start_date,
        };

        let txn = self.db.begin().await?;
        CompanyRequestRepository::new(&txn).update(params).await?;
        let request = refresh_request_status(&txn, existing.id).await?;
        txn.commit().await?;

        Ok(request)
    }

    /// Cancels a request and every active match on it.
    pub async fn cancel(&self, id: i32) -> Result<CompanyRequest, AppError> {
        self.finish(id, RequestStatus::Cancelled).await
    }

    /// Completes a request: accepted matches complete, pending ones are cancelled.
    pub async fn complete(&self, id: i32) -> Result<CompanyRequest, AppError> {
        self.finish(id, RequestStatus::Completed).await
    }

    async fn finish(&self, id: i32, status: RequestStatus) -> Result<CompanyRequest, AppError> {
        let txn = self.db.begin().await?;

        let request = find_request(&txn, id).await?;
        if request.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Request {} is already {}",
                request.id, request.status
            )));
        }

        let match_repo = DriverMatchRepository::new(&txn);
        if status == RequestStatus::Completed {
            match_repo
                .transition_for_request(id, &[MatchStatus::Accepted], MatchStatus::Completed)
                .await?;
            match_repo
                .transition_for_request(id, &[MatchStatus::Pending], MatchStatus::Cancelled)
                .await?;
        } else {
            match_repo
                .transition_for_request(
                    id,
                    &[MatchStatus::Pending, MatchStatus::Accepted],
                    MatchStatus::Cancelled,
                )
                .await?;
        }

        let request = CompanyRequestRepository::new(&txn)
            .set_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))?;
        txn.commit().await?;

        tracing::info!("Request {} marked {}", id, status);

        Ok(request)
    }
}

async fn find_request<C: ConnectionTrait>(db: &C, id: i32) -> Result<CompanyRequest, AppError> {
    CompanyRequestRepository::new(db)
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
}

fn validate_drivers_needed(drivers_needed: i32) -> Result<i32, AppError> {
    if drivers_needed < 1 {
        return Err(AppError::Validation(
            "drivers_needed must be at least 1".to_string(),
        ));
    }

    Ok(drivers_needed)
}

/// Recomputes the status of a request from its active matches.
///
/// Completed and cancelled requests are returned unchanged.
///
/// # Returns
/// - `Ok(CompanyRequest)` - Request with its current status
/// - `Err(AppError::NotFound)` - Request does not exist
pub async fn refresh_request_status<C: ConnectionTrait>(
    db: &C,
    request_id: i32,
) -> Result<CompanyRequest, AppError> {
    let request = find_request(db, request_id).await?;
    if request.status.is_terminal() {
        return Ok(request);
    }

    let active = DriverMatchRepository::new(db)
        .count_active_for_request(request_id)
        .await?;
    let status = RequestStatus::from_active_matches(active, request.drivers_needed);
    if status == request.status {
        return Ok(request);
    }

    CompanyRequestRepository::new(db)
        .set_status(request_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))
}
