//! Driver data repository.
//!
//! Provides `DriverRepository` for driver accounts and their KYC fields. Status columns are
//! stored as strings and parsed into domain enums by `Driver::from_entity`.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, Query, SelectStatement},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::{
    model::status::{DriverStatus, MatchStatus, OtpPurpose, VerificationStatus},
    server::{
        error::AppError,
        model::{
            driver::{
                CreateDriverParams, Driver, DriverFilter, LicenseParams, PersonalInfoParams,
                UpdateDriverParams,
            },
            page::Paginated,
        },
    },
};

pub struct DriverRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

/// Subquery selecting drivers that hold a pending or accepted match.
fn drivers_with_active_match() -> SelectStatement {
    Query::select()
        .column(entity::driver_match::Column::DriverId)
        .from(entity::driver_match::Entity)
        .and_where(entity::driver_match::Column::Status.is_in([
            MatchStatus::Pending.as_str(),
            MatchStatus::Accepted.as_str(),
        ]))
        .to_owned()
}

/// Condition matching drivers that can be assigned to a request.
fn available_condition() -> Condition {
    Condition::all()
        .add(entity::driver::Column::Status.eq(DriverStatus::Active.as_str()))
        .add(entity::driver::Column::VerificationStatus.eq(VerificationStatus::Verified.as_str()))
        .add(entity::driver::Column::Id.not_in_subquery(drivers_with_active_match()))
}

impl<'a, C: ConnectionTrait> DriverRepository<'a, C> {
    /// Creates a new DriverRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a freshly registered driver.
    ///
    /// New drivers are active, unverified, at KYC step 0 and have no verified contacts.
    ///
    /// # Returns
    /// - `Ok(Driver)` - The created driver
    /// - `Err(AppError::DbErr)` - Insert failed (e.g. duplicate phone or email)
    pub async fn create(&self, params: CreateDriverParams) -> Result<Driver, AppError> {
        let now = Utc::now();
        let driver = entity::driver::ActiveModel {
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            password_hash: ActiveValue::Set(params.password_hash),
            status: ActiveValue::Set(DriverStatus::Active.as_str().to_string()),
            verification_status: ActiveValue::Set(
                VerificationStatus::Unverified.as_str().to_string(),
            ),
            kyc_step: ActiveValue::Set(0),
            date_of_birth: ActiveValue::Set(None),
            address: ActiveValue::Set(None),
            city: ActiveValue::Set(params.city),
            national_id_number: ActiveValue::Set(None),
            license_number: ActiveValue::Set(None),
            license_expiry: ActiveValue::Set(None),
            vehicle_type: ActiveValue::Set(None),
            vehicle_plate: ActiveValue::Set(None),
            kyc_submitted_at: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            verified_at: ActiveValue::Set(None),
            verified_by: ActiveValue::Set(None),
            phone_verified_at: ActiveValue::Set(None),
            email_verified_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Driver::from_entity(driver)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Driver>, AppError> {
        entity::prelude::Driver::find_by_id(id)
            .one(self.db)
            .await?
            .map(Driver::from_entity)
            .transpose()
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<Driver>, AppError> {
        entity::prelude::Driver::find()
            .filter(entity::driver::Column::Phone.eq(phone))
            .one(self.db)
            .await?
            .map(Driver::from_entity)
            .transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Driver>, AppError> {
        entity::prelude::Driver::find()
            .filter(entity::driver::Column::Email.eq(email))
            .one(self.db)
            .await?
            .map(Driver::from_entity)
            .transpose()
    }

    /// Checks whether another driver already uses `email` or `phone`.
    ///
    /// # Arguments
    /// - `email` - Email to check
    /// - `phone` - Phone number to check
    /// - `exclude_id` - Driver to ignore, used when updating that driver
    ///
    /// # Returns
    /// - `Ok(Some(field))` - `"email"` or `"phone"`, whichever is taken first
    /// - `Ok(None)` - Both are free
    pub async fn find_contact_conflict(
        &self,
        email: &str,
        phone: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<&'static str>, AppError> {
        for (field, column, value) in [
            ("email", entity::driver::Column::Email, email),
            ("phone", entity::driver::Column::Phone, phone),
        ] {
            let mut query = entity::prelude::Driver::find().filter(column.eq(value));
            if let Some(id) = exclude_id {
                query = query.filter(entity::driver::Column::Id.ne(id));
            }
            if query.count(self.db).await? > 0 {
                return Ok(Some(field));
            }
        }

        Ok(None)
    }

    fn filtered(filter: &DriverFilter) -> Select<entity::prelude::Driver> {
        let mut query = entity::prelude::Driver::find();

        if let Some(search) = filter.search.as_deref() {
            query = query.filter(
                Condition::any()
                    .add(entity::driver::Column::FirstName.contains(search))
                    .add(entity::driver::Column::LastName.contains(search))
                    .add(entity::driver::Column::Email.contains(search))
                    .add(entity::driver::Column::Phone.contains(search)),
            );
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::driver::Column::Status.eq(status.as_str()));
        }
        if let Some(verification_status) = filter.verification_status {
            query = query.filter(
                entity::driver::Column::VerificationStatus.eq(verification_status.as_str()),
            );
        }
        match filter.available {
            Some(true) => query = query.filter(available_condition()),
            Some(false) => query = query.filter(available_condition().not()),
            None => {}
        }

        query
    }

    /// Gets a page of drivers matching `filter`, newest first.
    ///
    /// # Arguments
    /// - `filter` - Search and status filters, combined with AND
    /// - `page` - Zero-based page number
    /// - `per_page` - Number of drivers per page
    pub async fn get_paginated(
        &self,
        filter: &DriverFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Driver>, AppError> {
        let paginator = Self::filtered(filter)
            .order_by_desc(entity::driver::Column::CreatedAt)
            .order_by_desc(entity::driver::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let drivers = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Driver::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(drivers, total, page, per_page))
    }

    /// Gets every driver matching `filter` ordered by id, used for CSV export.
    pub async fn get_all(&self, filter: &DriverFilter) -> Result<Vec<Driver>, AppError> {
        Self::filtered(filter)
            .order_by_asc(entity::driver::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Driver::from_entity)
            .collect()
    }

    pub async fn count(&self, filter: &DriverFilter) -> Result<u64, AppError> {
        Ok(Self::filtered(filter).count(self.db).await?)
    }

    /// Gets drivers available for matching ordered by id.
    ///
    /// A driver is available when active, verified and holding no pending or accepted match.
    pub async fn get_available(&self) -> Result<Vec<Driver>, AppError> {
        entity::prelude::Driver::find()
            .filter(available_condition())
            .order_by_asc(entity::driver::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Driver::from_entity)
            .collect()
    }

    /// Checks whether a single driver is available for matching.
    pub async fn is_available(&self, id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::Driver::find()
            .filter(entity::driver::Column::Id.eq(id))
            .filter(available_condition())
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    async fn find_entity(&self, id: i32) -> Result<Option<entity::driver::Model>, AppError> {
        Ok(entity::prelude::Driver::find_by_id(id).one(self.db).await?)
    }

    /// Updates contact details, city and account status.
    ///
    /// # Returns
    /// - `Ok(Some(Driver))` - The updated driver
    /// - `Ok(None)` - No driver with that id
    pub async fn update(&self, params: UpdateDriverParams) -> Result<Option<Driver>, AppError> {
        let Some(driver) = self.find_entity(params.id).await? else {
            return Ok(None);
        };

        let mut active: entity::driver::ActiveModel = driver.into();
        active.first_name = ActiveValue::Set(params.first_name);
        active.last_name = ActiveValue::Set(params.last_name);
        active.email = ActiveValue::Set(params.email);
        active.phone = ActiveValue::Set(params.phone);
        active.city = ActiveValue::Set(params.city);
        active.status = ActiveValue::Set(params.status.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Driver::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Sets the account status of every driver in `ids`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of drivers updated
    pub async fn set_status_many(&self, ids: &[i32], status: DriverStatus) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Driver::update_many()
            .col_expr(entity::driver::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::driver::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::driver::Column::Id.is_in(ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Driver::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes every driver in `ids`. Documents, logs and matches go with them by cascade.
    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Driver::delete_many()
            .filter(entity::driver::Column::Id.is_in(ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Stores KYC step 1 values and advances `kyc_step` to at least 1.
    pub async fn save_personal_info(
        &self,
        id: i32,
        params: PersonalInfoParams,
    ) -> Result<Option<Driver>, AppError> {
        let Some(driver) = self.find_entity(id).await? else {
            return Ok(None);
        };
        let step = driver.kyc_step.max(1);

        let mut active: entity::driver::ActiveModel = driver.into();
        active.date_of_birth = ActiveValue::Set(Some(params.date_of_birth));
        active.address = ActiveValue::Set(Some(params.address));
        active.city = ActiveValue::Set(Some(params.city));
        active.national_id_number = ActiveValue::Set(Some(params.national_id_number));
        active.kyc_step = ActiveValue::Set(step);
        active.updated_at = ActiveValue::Set(Utc::now());

        Driver::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Stores KYC step 2 values and advances `kyc_step` to at least 2.
    pub async fn save_license(
        &self,
        id: i32,
        params: LicenseParams,
    ) -> Result<Option<Driver>, AppError> {
        let Some(driver) = self.find_entity(id).await? else {
            return Ok(None);
        };
        let step = driver.kyc_step.max(2);

        let mut active: entity::driver::ActiveModel = driver.into();
        active.license_number = ActiveValue::Set(Some(params.license_number));
        active.license_expiry = ActiveValue::Set(Some(params.license_expiry));
        active.vehicle_type = ActiveValue::Set(Some(params.vehicle_type));
        active.vehicle_plate = ActiveValue::Set(Some(params.vehicle_plate));
        active.kyc_step = ActiveValue::Set(step);
        active.updated_at = ActiveValue::Set(Utc::now());

        Driver::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Marks documents as submitted: step 3, pending review, previous rejection cleared.
    pub async fn mark_kyc_submitted(
        &self,
        id: i32,
        submitted_at: DateTime<Utc>,
    ) -> Result<Option<Driver>, AppError> {
        let Some(driver) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::driver::ActiveModel = driver.into();
        active.kyc_step = ActiveValue::Set(3);
        active.verification_status =
            ActiveValue::Set(VerificationStatus::Pending.as_str().to_string());
        active.kyc_submitted_at = ActiveValue::Set(Some(submitted_at));
        active.rejection_reason = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(submitted_at);

        Driver::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Records an approval by `admin_id`.
    pub async fn approve(
        &self,
        id: i32,
        admin_id: i32,
        verified_at: DateTime<Utc>,
    ) -> Result<Option<Driver>, AppError> {
        let Some(driver) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::driver::ActiveModel = driver.into();
        active.verification_status =
            ActiveValue::Set(VerificationStatus::Verified.as_str().to_string());
        active.verified_at = ActiveValue::Set(Some(verified_at));
        active.verified_by = ActiveValue::Set(Some(admin_id));
        active.rejection_reason = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(verified_at);

        Driver::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Records a rejection: status `rejected`, reason stored, KYC reset to step 0.
    pub async fn reject(&self, id: i32, reason: String) -> Result<Option<Driver>, AppError> {
        let Some(driver) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active: entity::driver::ActiveModel = driver.into();
        active.verification_status =
            ActiveValue::Set(VerificationStatus::Rejected.as_str().to_string());
        active.rejection_reason = ActiveValue::Set(Some(reason));
        active.kyc_step = ActiveValue::Set(0);
        active.verified_at = ActiveValue::Set(None);
        active.verified_by = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(Utc::now());

        Driver::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Stamps the contact verification timestamp of the driver owning `identifier`.
    ///
    /// `identifier` is a phone number for phone verification and an email otherwise.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of drivers updated (0 or 1)
    pub async fn mark_contact_verified(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
        verified_at: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let (match_column, stamp_column) = match purpose {
            OtpPurpose::PhoneVerification => (
                entity::driver::Column::Phone,
                entity::driver::Column::PhoneVerifiedAt,
            ),
            OtpPurpose::EmailVerification => (
                entity::driver::Column::Email,
                entity::driver::Column::EmailVerifiedAt,
            ),
        };

        let result = entity::prelude::Driver::update_many()
            .col_expr(stamp_column, Expr::value(verified_at))
            .col_expr(entity::driver::Column::UpdatedAt, Expr::value(verified_at))
            .filter(match_column.eq(identifier))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
