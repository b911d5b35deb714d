use sea_orm::DatabaseConnection;

use crate::{
    model::status::RequestStatus,
    server::{
        data::{company::CompanyRepository, company_request::CompanyRequestRepository},
        error::AppError,
        model::{
            company::{Company, CompanyDetail, CompanyFilter, CompanyParams},
            page::Paginated,
        },
        util::parse::{self, optional_text, required_text},
    },
};

/// Requests still waiting for drivers.
const OPEN_STATUSES: [RequestStatus; 2] = [RequestStatus::Open, RequestStatus::PartiallyMatched];

pub struct CompanyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompanyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: CompanyFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Company>, AppError> {
        let filter = CompanyFilter {
            search: optional_text(filter.search),
            is_active: filter.is_active,
        };

        Ok(CompanyRepository::new(self.db)
            .get_paginated(&filter, page, per_page)
            .await?)
    }

    /// Gets a company with its total and open request counts.
    pub async fn get(&self, id: i32) -> Result<CompanyDetail, AppError> {
        let company = self.find(id).await?;

        let request_repo = CompanyRequestRepository::new(self.db);
        let request_count = request_repo.count_for_company(id, None).await?;
        let open_request_count = request_repo
            .count_for_company(id, Some(&OPEN_STATUSES))
            .await?;

        Ok(CompanyDetail {
            company,
            request_count,
            open_request_count,
        })
    }

    /// Creates an active company.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Email already used by another company
    /// - `Err(AppError::Validation)` - Missing name or invalid email/phone
    pub async fn create(&self, params: CompanyParams) -> Result<Company, AppError> {
        let params = validate(params)?;

        let company_repo = CompanyRepository::new(self.db);
        if company_repo.email_taken(&params.email, None).await? {
            return Err(AppError::Conflict(format!(
                "A company with email {} already exists",
                params.email
            )));
        }

        let company = company_repo.create(params).await?;
        tracing::info!("Created company {} ({})", company.id, company.name);

        Ok(company)
    }

    pub async fn update(&self, id: i32, params: CompanyParams) -> Result<Company, AppError> {
        let params = validate(params)?;

        let company_repo = CompanyRepository::new(self.db);
        if company_repo.email_taken(&params.email, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "A company with email {} already exists",
                params.email
            )));
        }

        company_repo
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))
    }

    /// Flips the active flag.
    pub async fn toggle_active(&self, id: i32) -> Result<Company, AppError> {
        let company = self.find(id).await?;

        let company = CompanyRepository::new(self.db)
            .set_active(id, !company.is_active)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))?;
        tracing::info!(
            "Company {} is now {}",
            company.id,
            if company.is_active { "active" } else { "inactive" }
        );

        Ok(company)
    }

    /// Deletes a company together with its requests and their matches.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !CompanyRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Company {} not found", id)));
        }

        tracing::info!("Deleted company {}", id);

        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Company, AppError> {
        CompanyRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))
    }
}

fn validate(params: CompanyParams) -> Result<CompanyParams, AppError> {
    Ok(CompanyParams {
        name: required_text("name", params.name)?,
        email: parse::email(params.email)?,
        phone: parse::phone(params.phone)?,
        address: optional_text(params.address),
        contact_person: optional_text(params.contact_person),
    })
}
