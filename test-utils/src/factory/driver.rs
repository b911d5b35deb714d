//! Driver factory for creating test drivers at any onboarding stage.

use crate::factory::helpers::next_id;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test drivers with customizable fields.
///
/// Defaults describe a freshly registered driver: active, unverified, KYC step 0 and no
/// profile details. Use `with_kyc_details()` to fill in steps 1 and 2.
///
/// # Example
///
/// ```rust,ignore
/// let driver = DriverFactory::new(&db)
///     .verification_status("pending")
///     .kyc_step(3)
///     .build()
///     .await?;
/// ```
pub struct DriverFactory<'a> {
    db: &'a DatabaseConnection,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    password_hash: Option<String>,
    status: String,
    verification_status: String,
    kyc_step: i32,
    kyc_details: bool,
    phone_verified: bool,
    city: Option<String>,
}

impl<'a> DriverFactory<'a> {
    /// Creates a new DriverFactory with default values.
    ///
    /// Defaults:
    /// - first_name / last_name: `"Driver"` / `"{id}"`
    /// - email: `"driver{id}@example.com"`
    /// - phone: `"+234800{id:07}"`
    /// - status: `"active"`, verification_status: `"unverified"`, kyc_step: `0`
    /// - phone_verified: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            first_name: "Driver".to_string(),
            last_name: id.to_string(),
            email: format!("driver{}@example.com", id),
            phone: format!("+234800{:07}", id),
            password_hash: None,
            status: "active".to_string(),
            verification_status: "unverified".to_string(),
            kyc_step: 0,
            kyc_details: false,
            phone_verified: true,
            city: None,
        }
    }

    pub fn name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    /// Sets the account status (`active`, `inactive` or `suspended`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the verification status (`unverified`, `pending`, `verified` or `rejected`).
    pub fn verification_status(mut self, verification_status: impl Into<String>) -> Self {
        self.verification_status = verification_status.into();
        self
    }

    pub fn kyc_step(mut self, kyc_step: i32) -> Self {
        self.kyc_step = kyc_step;
        self
    }

    /// Fills in personal, license and vehicle details as if KYC steps 1 and 2 were completed.
    pub fn with_kyc_details(mut self) -> Self {
        self.kyc_details = true;
        self
    }

    pub fn phone_verified(mut self, phone_verified: bool) -> Self {
        self.phone_verified = phone_verified;
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Builds and inserts the driver entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::driver::Model)` - Created driver
    /// - `Err(DbErr)` - Database error during insert (e.g. duplicate phone or email)
    pub async fn build(self) -> Result<entity::driver::Model, DbErr> {
        let now = Utc::now();
        let details = self.kyc_details;
        let verified = self.verification_status == "verified";

        entity::driver::ActiveModel {
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            email: ActiveValue::Set(self.email),
            phone: ActiveValue::Set(self.phone),
            password_hash: ActiveValue::Set(self.password_hash),
            status: ActiveValue::Set(self.status),
            verification_status: ActiveValue::Set(self.verification_status),
            kyc_step: ActiveValue::Set(self.kyc_step),
            date_of_birth: ActiveValue::Set(details.then(|| {
                NaiveDate::from_ymd_opt(1990, 1, 15).unwrap_or_default()
            })),
            address: ActiveValue::Set(details.then(|| "12 Marina Road".to_string())),
            city: ActiveValue::Set(self.city.or_else(|| details.then(|| "Lagos".to_string()))),
            national_id_number: ActiveValue::Set(details.then(|| "NIN12345678".to_string())),
            license_number: ActiveValue::Set(details.then(|| "LIC-0001".to_string())),
            license_expiry: ActiveValue::Set(
                details.then(|| (now + chrono::Duration::days(365)).date_naive()),
            ),
            vehicle_type: ActiveValue::Set(details.then(|| "sedan".to_string())),
            vehicle_plate: ActiveValue::Set(details.then(|| "LAG-123-AB".to_string())),
            kyc_submitted_at: ActiveValue::Set((self.kyc_step >= 3).then_some(now)),
            rejection_reason: ActiveValue::Set(None),
            verified_at: ActiveValue::Set(verified.then_some(now)),
            verified_by: ActiveValue::Set(None),
            phone_verified_at: ActiveValue::Set(self.phone_verified.then_some(now)),
            email_verified_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a freshly registered driver with default values.
pub async fn create_driver(db: &DatabaseConnection) -> Result<entity::driver::Model, DbErr> {
    DriverFactory::new(db).build().await
}

/// Creates an active driver that completed KYC and was verified.
///
/// Such a driver is available for matching as long as it holds no active match.
pub async fn create_verified_driver(
    db: &DatabaseConnection,
) -> Result<entity::driver::Model, DbErr> {
    DriverFactory::new(db)
        .with_kyc_details()
        .kyc_step(3)
        .verification_status("verified")
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_driver_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Driver).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let driver = create_driver(db).await?;

        assert_eq!(driver.status, "active");
        assert_eq!(driver.verification_status, "unverified");
        assert_eq!(driver.kyc_step, 0);
        assert!(driver.phone_verified_at.is_some());
        assert!(driver.license_number.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_verified_driver_with_details() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Driver).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let driver = create_verified_driver(db).await?;

        assert_eq!(driver.verification_status, "verified");
        assert_eq!(driver.kyc_step, 3);
        assert!(driver.verified_at.is_some());
        assert!(driver.kyc_submitted_at.is_some());
        assert_eq!(driver.vehicle_type.as_deref(), Some("sedan"));

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_drivers() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Driver).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_driver(db).await?;
        let second = create_driver(db).await?;

        assert_ne!(first.email, second.email);
        assert_ne!(first.phone, second.phone);

        Ok(())
    }
}
