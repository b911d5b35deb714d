//! Company job request data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    model::status::RequestStatus,
    server::{
        error::AppError,
        model::{
            company_request::{
                CompanyRequest, CompanyRequestFilter, CreateCompanyRequestParams,
                UpdateCompanyRequestParams,
            },
            page::Paginated,
        },
    },
};

pub struct CompanyRequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompanyRequestRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an open request.
    pub async fn create(
        &self,
        params: CreateCompanyRequestParams,
    ) -> Result<CompanyRequest, AppError> {
        let now = Utc::now();
        let request = entity::company_request::ActiveModel {
            company_id: ActiveValue::Set(params.company_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            vehicle_type: ActiveValue::Set(params.vehicle_type),
            drivers_needed: ActiveValue::Set(params.drivers_needed),
            status: ActiveValue::Set(RequestStatus::Open.as_str().to_string()),
            start_date: ActiveValue::Set(params.start_date),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        CompanyRequest::from_entity(request)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<CompanyRequest>, AppError> {
        entity::prelude::CompanyRequest::find_by_id(id)
            .one(self.db)
            .await?
            .map(CompanyRequest::from_entity)
            .transpose()
    }

    /// Gets a page of requests, newest first.
    ///
    /// # Arguments
    /// - `filter` - Optional company and status filters
    /// - `page` - Zero-based page number
    /// - `per_page` - Number of requests per page
    pub async fn get_paginated(
        &self,
        filter: &CompanyRequestFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<CompanyRequest>, AppError> {
        let mut query = entity::prelude::CompanyRequest::find()
            .order_by_desc(entity::company_request::Column::CreatedAt)
            .order_by_desc(entity::company_request::Column::Id);
        if let Some(company_id) = filter.company_id {
            query = query.filter(entity::company_request::Column::CompanyId.eq(company_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::company_request::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let requests = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(CompanyRequest::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(requests, total, page, per_page))
    }

    /// Gets open and partially matched requests, oldest first.
    pub async fn get_matchable(&self) -> Result<Vec<CompanyRequest>, AppError> {
        entity::prelude::CompanyRequest::find()
            .filter(entity::company_request::Column::Status.is_in([
                RequestStatus::Open.as_str(),
                RequestStatus::PartiallyMatched.as_str(),
            ]))
            .order_by_asc(entity::company_request::Column::CreatedAt)
            .order_by_asc(entity::company_request::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(CompanyRequest::from_entity)
            .collect()
    }

    pub async fn update(
        &self,
        params: UpdateCompanyRequestParams,
    ) -> Result<Option<CompanyRequest>, AppError> {
        let Some(request) = entity::prelude::CompanyRequest::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::company_request::ActiveModel = request.into();
        active.title = ActiveValue::Set(params.title);
        active.description = ActiveValue::Set(params.description);
        active.location = ActiveValue::Set(params.location);
        active.vehicle_type = ActiveValue::Set(params.vehicle_type);
        active.drivers_needed = ActiveValue::Set(params.drivers_needed);
        active.start_date = ActiveValue::Set(params.start_date);
        active.updated_at = ActiveValue::Set(Utc::now());

        CompanyRequest::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: RequestStatus,
    ) -> Result<Option<CompanyRequest>, AppError> {
        let Some(request) = entity::prelude::CompanyRequest::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::company_request::ActiveModel = request.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        CompanyRequest::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Counts a company's requests, optionally restricted to `statuses`.
    pub async fn count_for_company(
        &self,
        company_id: i32,
        statuses: Option<&[RequestStatus]>,
    ) -> Result<u64, AppError> {
        let mut query = entity::prelude::CompanyRequest::find()
            .filter(entity::company_request::Column::CompanyId.eq(company_id));
        if let Some(statuses) = statuses {
            let values: Vec<&str> = statuses.iter().map(RequestStatus::as_str).collect();
            query = query.filter(entity::company_request::Column::Status.is_in(values));
        }

        Ok(query.count(self.db).await?)
    }
}
