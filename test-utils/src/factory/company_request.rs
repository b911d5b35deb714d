//! Company request factory for creating test job requests.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test job requests with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let request = CompanyRequestFactory::new(&db, company.id)
///     .drivers_needed(3)
///     .created_at(Utc::now() - Duration::days(1))
///     .build()
///     .await?;
/// ```
pub struct CompanyRequestFactory<'a> {
    db: &'a DatabaseConnection,
    company_id: i32,
    title: String,
    location: String,
    vehicle_type: Option<String>,
    drivers_needed: i32,
    status: String,
    created_at: DateTime<Utc>,
}

impl<'a> CompanyRequestFactory<'a> {
    /// Creates a new CompanyRequestFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Request {id}"`
    /// - location: `"Lagos"`
    /// - drivers_needed: `1`
    /// - status: `"open"`
    /// - created_at: now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `company_id` - Company owning the request
    pub fn new(db: &'a DatabaseConnection, company_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            company_id,
            title: format!("Request {}", id),
            location: "Lagos".to_string(),
            vehicle_type: None,
            drivers_needed: 1,
            status: "open".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn vehicle_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self
    }

    pub fn drivers_needed(mut self, drivers_needed: i32) -> Self {
        self.drivers_needed = drivers_needed;
        self
    }

    /// Sets the stored status without recomputing it from matches.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the creation time, which drives auto-match ordering.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::company_request::Model, DbErr> {
        entity::company_request::ActiveModel {
            company_id: ActiveValue::Set(self.company_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            location: ActiveValue::Set(self.location),
            vehicle_type: ActiveValue::Set(self.vehicle_type),
            drivers_needed: ActiveValue::Set(self.drivers_needed),
            status: ActiveValue::Set(self.status),
            start_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open request needing one driver for the given company.
pub async fn create_request(
    db: &DatabaseConnection,
    company_id: i32,
) -> Result<entity::company_request::Model, DbErr> {
    CompanyRequestFactory::new(db, company_id).build().await
}
