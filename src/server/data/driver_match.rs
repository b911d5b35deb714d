//! Driver match data repository.
//!
//! A match is active while `pending` or `accepted`; every other status is final.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::status::MatchStatus,
    server::{
        error::AppError,
        model::{
            driver_match::{CreateMatchParams, DriverMatch, MatchFilter},
            page::Paginated,
        },
    },
};

const ACTIVE_STATUSES: [MatchStatus; 2] = [MatchStatus::Pending, MatchStatus::Accepted];

fn status_values(statuses: &[MatchStatus]) -> Vec<&'static str> {
    statuses.iter().map(MatchStatus::as_str).collect()
}

pub struct DriverMatchRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DriverMatchRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending match.
    pub async fn create(&self, params: CreateMatchParams) -> Result<DriverMatch, AppError> {
        let now = Utc::now();
        let driver_match = entity::driver_match::ActiveModel {
            driver_id: ActiveValue::Set(params.driver_id),
            company_request_id: ActiveValue::Set(params.company_request_id),
            status: ActiveValue::Set(MatchStatus::Pending.as_str().to_string()),
            auto_matched: ActiveValue::Set(params.auto_matched),
            matched_by: ActiveValue::Set(params.matched_by),
            responded_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        DriverMatch::from_entity(driver_match)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<DriverMatch>, AppError> {
        entity::prelude::DriverMatch::find_by_id(id)
            .one(self.db)
            .await?
            .map(DriverMatch::from_entity)
            .transpose()
    }

    /// Gets a page of matches, newest first.
    pub async fn get_paginated(
        &self,
        filter: &MatchFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<DriverMatch>, AppError> {
        let mut query = entity::prelude::DriverMatch::find()
            .order_by_desc(entity::driver_match::Column::CreatedAt)
            .order_by_desc(entity::driver_match::Column::Id);
        if let Some(status) = filter.status {
            query = query.filter(entity::driver_match::Column::Status.eq(status.as_str()));
        }
        if let Some(request_id) = filter.company_request_id {
            query = query.filter(entity::driver_match::Column::CompanyRequestId.eq(request_id));
        }
        if let Some(driver_id) = filter.driver_id {
            query = query.filter(entity::driver_match::Column::DriverId.eq(driver_id));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let matches = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(DriverMatch::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(matches, total, page, per_page))
    }

    pub async fn get_by_request(&self, request_id: i32) -> Result<Vec<DriverMatch>, AppError> {
        entity::prelude::DriverMatch::find()
            .filter(entity::driver_match::Column::CompanyRequestId.eq(request_id))
            .order_by_asc(entity::driver_match::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(DriverMatch::from_entity)
            .collect()
    }

    /// Gets a driver's matches, newest first.
    pub async fn get_by_driver(&self, driver_id: i32) -> Result<Vec<DriverMatch>, AppError> {
        entity::prelude::DriverMatch::find()
            .filter(entity::driver_match::Column::DriverId.eq(driver_id))
            .order_by_desc(entity::driver_match::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(DriverMatch::from_entity)
            .collect()
    }

    /// Gets every match ordered by id, used for CSV export.
    pub async fn get_all(&self) -> Result<Vec<DriverMatch>, AppError> {
        entity::prelude::DriverMatch::find()
            .order_by_asc(entity::driver_match::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(DriverMatch::from_entity)
            .collect()
    }

    /// Sets the status of one match.
    ///
    /// # Arguments
    /// - `id` - Match id
    /// - `status` - New status
    /// - `responded_at` - Set when the driver accepted or declined
    pub async fn set_status(
        &self,
        id: i32,
        status: MatchStatus,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<Option<DriverMatch>, AppError> {
        let Some(driver_match) = entity::prelude::DriverMatch::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::driver_match::ActiveModel = driver_match.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        if responded_at.is_some() {
            active.responded_at = ActiveValue::Set(responded_at);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        DriverMatch::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Moves every match of a request whose status is in `from` to `to`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of matches updated
    pub async fn transition_for_request(
        &self,
        request_id: i32,
        from: &[MatchStatus],
        to: MatchStatus,
    ) -> Result<u64, AppError> {
        let result = entity::prelude::DriverMatch::update_many()
            .col_expr(entity::driver_match::Column::Status, Expr::value(to.as_str()))
            .col_expr(entity::driver_match::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::driver_match::Column::CompanyRequestId.eq(request_id))
            .filter(entity::driver_match::Column::Status.is_in(status_values(from)))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn count_active_for_request(&self, request_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::DriverMatch::find()
            .filter(entity::driver_match::Column::CompanyRequestId.eq(request_id))
            .filter(entity::driver_match::Column::Status.is_in(status_values(&ACTIVE_STATUSES)))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Gets the pending or accepted matches held by a driver.
    pub async fn get_active_for_driver(
        &self,
        driver_id: i32,
    ) -> Result<Vec<DriverMatch>, AppError> {
        entity::prelude::DriverMatch::find()
            .filter(entity::driver_match::Column::DriverId.eq(driver_id))
            .filter(entity::driver_match::Column::Status.is_in(status_values(&ACTIVE_STATUSES)))
            .all(self.db)
            .await?
            .into_iter()
            .map(DriverMatch::from_entity)
            .collect()
    }
}
