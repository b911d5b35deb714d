//! Driver self-service: registration, login and contact verification requests.

use sea_orm::DatabaseConnection;

use crate::{
    model::status::{Channel, DriverStatus, OtpPurpose},
    server::{
        data::driver::DriverRepository,
        error::{auth::AuthError, AppError},
        model::driver::{CreateDriverParams, Driver},
        service::{
            driver::validate_new_driver,
            notification::Notifier,
            otp::{IssuedOtp, OtpService},
        },
        util::{
            parse,
            password::{hash_password, validate_password, verify_password},
        },
    },
};

#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

pub struct DriverPortalService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a Notifier,
}

impl<'a> DriverPortalService<'a> {
    pub fn new(db: &'a DatabaseConnection, notifier: &'a Notifier) -> Self {
        Self { db, notifier }
    }

    /// Registers a driver and sends a phone verification code.
    ///
    /// # Returns
    /// - `Ok((Driver, IssuedOtp))` - New driver and the issued phone code
    /// - `Err(AppError::Conflict)` - Email or phone already registered
    /// - `Err(AppError::Validation)` - Invalid input
    pub async fn register(&self, params: Registration) -> Result<(Driver, IssuedOtp), AppError> {
        validate_password(&params.password)?;

        let params = validate_new_driver(
            self.db,
            CreateDriverParams {
                first_name: params.first_name,
                last_name: params.last_name,
                email: params.email,
                phone: params.phone,
                password_hash: Some(hash_password(&params.password)?),
                city: None,
            },
        )
        .await?;

        let driver = DriverRepository::new(self.db).create(params).await?;
        tracing::info!("Driver {} registered", driver.id);

        let otp = OtpService::new(self.db, self.notifier)
            .issue(&driver.phone, Channel::Sms, OtpPurpose::PhoneVerification)
            .await?;

        Ok((driver, otp))
    }

    /// Logs a driver in by phone and password.
    ///
    /// # Returns
    /// - `Ok(Driver)` - Credentials valid
    /// - `Err(AuthError::InvalidCredentials)` - Unknown phone, no password set, or wrong password
    /// - `Err(AuthError::PhoneNotVerified)` - Phone number not verified yet
    /// - `Err(AuthError::AccountInactive)` - Account suspended
    pub async fn login(&self, phone: &str, password: &str) -> Result<Driver, AppError> {
        let phone = parse::phone(phone.to_string()).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(driver) = DriverRepository::new(self.db).find_by_phone(&phone).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = driver
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash));
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        if driver.phone_verified_at.is_none() {
            return Err(AuthError::PhoneNotVerified(driver.id).into());
        }

        if driver.status == DriverStatus::Suspended {
            return Err(AuthError::AccountInactive(driver.id).into());
        }

        Ok(driver)
    }

    /// Issues a verification code for a driver's phone or email.
    ///
    /// A logged-in driver verifies their own contact. Without a session only phone
    /// verification is possible, for a registered driver whose phone is still unverified.
    ///
    /// # Returns
    /// - `Ok(IssuedOtp)` - Code issued
    /// - `Err(AuthError::NotLoggedIn)` - No session and the request cannot be served anonymously
    pub async fn request_otp(
        &self,
        driver: Option<&Driver>,
        channel: Channel,
        purpose: OtpPurpose,
        phone: Option<String>,
    ) -> Result<IssuedOtp, AppError> {
        let identifier = match (driver, purpose) {
            (Some(driver), OtpPurpose::PhoneVerification) => driver.phone.clone(),
            (Some(driver), OtpPurpose::EmailVerification) => driver.email.clone(),
            (None, OtpPurpose::PhoneVerification) => {
                let phone = phone.ok_or(AuthError::NotLoggedIn)?;
                let phone = parse::phone(phone)?;

                let unverified = DriverRepository::new(self.db)
                    .find_by_phone(&phone)
                    .await?
                    .is_some_and(|d| d.phone_verified_at.is_none());
                if !unverified {
                    return Err(AppError::NotFound(
                        "No unverified driver with that phone number".to_string(),
                    ));
                }

                phone
            }
            (None, OtpPurpose::EmailVerification) => return Err(AuthError::NotLoggedIn.into()),
        };

        OtpService::new(self.db, self.notifier)
            .issue(&identifier, channel, purpose)
            .await
    }
}
