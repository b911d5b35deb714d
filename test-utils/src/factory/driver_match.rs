//! Driver match factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test matches between a driver and a request.
pub struct DriverMatchFactory<'a> {
    db: &'a DatabaseConnection,
    driver_id: i32,
    company_request_id: i32,
    status: String,
    auto_matched: bool,
    matched_by: Option<i32>,
}

impl<'a> DriverMatchFactory<'a> {
    /// Creates a new DriverMatchFactory for a `pending`, manually created match.
    pub fn new(db: &'a DatabaseConnection, driver_id: i32, company_request_id: i32) -> Self {
        Self {
            db,
            driver_id,
            company_request_id,
            status: "pending".to_string(),
            auto_matched: false,
            matched_by: None,
        }
    }

    /// Sets the match status (`pending`, `accepted`, `declined`, `cancelled` or `completed`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn auto_matched(mut self, auto_matched: bool) -> Self {
        self.auto_matched = auto_matched;
        self
    }

    pub fn matched_by(mut self, admin_user_id: i32) -> Self {
        self.matched_by = Some(admin_user_id);
        self
    }

    pub async fn build(self) -> Result<entity::driver_match::Model, DbErr> {
        let now = Utc::now();
        let responded = self.status != "pending";
        entity::driver_match::ActiveModel {
            driver_id: ActiveValue::Set(self.driver_id),
            company_request_id: ActiveValue::Set(self.company_request_id),
            status: ActiveValue::Set(self.status),
            auto_matched: ActiveValue::Set(self.auto_matched),
            matched_by: ActiveValue::Set(self.matched_by),
            responded_at: ActiveValue::Set(responded.then_some(now)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending match for the given driver and request.
pub async fn create_match(
    db: &DatabaseConnection,
    driver_id: i32,
    company_request_id: i32,
) -> Result<entity::driver_match::Model, DbErr> {
    DriverMatchFactory::new(db, driver_id, company_request_id)
        .build()
        .await
}
