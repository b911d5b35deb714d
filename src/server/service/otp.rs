//! One-time codes for verifying driver phone numbers and email addresses.
//!
//! Codes are six digits, stored only as a sha256 hex digest and valid for ten minutes.
//! A new code replaces any pending one but cannot be requested within a minute of the
//! previous. Three wrong guesses lock the code.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::{DatabaseConnection, TransactionTrait};
use sha2::{Digest, Sha256};

use crate::{
    model::status::{Channel, OtpPurpose},
    server::{
        data::{driver::DriverRepository, otp::OtpRepository},
        error::{otp::OtpError, AppError},
        model::{
            notification::Recipient,
            otp::{CreateOtpParams, OtpRecord},
        },
        service::notification::{variables, Notifier, OTP_CODE_TEMPLATE, OTP_EMAIL_TEMPLATE},
        util::parse,
    },
};

pub const OTP_TTL_MINUTES: i64 = 10;
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;
pub const MAX_ATTEMPTS: i32 = 3;
const CODE_LENGTH: usize = 6;

/// A freshly issued code. `code` is only kept in memory long enough to deliver it.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub record: OtpRecord,
    pub code: String,
}

pub struct OtpService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a Notifier,
}

impl<'a> OtpService<'a> {
    pub fn new(db: &'a DatabaseConnection, notifier: &'a Notifier) -> Self {
        Self { db, notifier }
    }

    /// Issues a code and dispatches it through the OTP template of `channel`.
    ///
    /// # Returns
    /// - `Ok(IssuedOtp)` - Stored record and the plain code
    /// - `Err(OtpError::ResendCooldown)` - Previous code is younger than the cooldown
    /// - `Err(AppError::Validation)` - Channel does not fit the purpose or malformed identifier
    pub async fn issue(
        &self,
        identifier: &str,
        channel: Channel,
        purpose: OtpPurpose,
    ) -> Result<IssuedOtp, AppError> {
        self.issue_at(identifier, channel, purpose, Utc::now()).await
    }

    pub async fn issue_at(
        &self,
        identifier: &str,
        channel: Channel,
        purpose: OtpPurpose,
        now: DateTime<Utc>,
    ) -> Result<IssuedOtp, AppError> {
        if channel != channel_for(purpose) {
            return Err(AppError::Validation(format!(
                "{} codes are sent by {}",
                purpose,
                channel_for(purpose)
            )));
        }
        let identifier = normalize_identifier(identifier, purpose)?;
        let identifier = identifier.as_str();

        let txn = self.db.begin().await?;
        let repo = OtpRepository::new(&txn);

        if let Some(previous) = repo.find_latest_pending(identifier, purpose).await? {
            let elapsed = (now - previous.created_at).num_seconds();
            if elapsed < RESEND_COOLDOWN_SECONDS {
                return Err(OtpError::ResendCooldown {
                    retry_after: RESEND_COOLDOWN_SECONDS - elapsed,
                }
                .into());
            }
        }

        repo.invalidate_pending(identifier, purpose).await?;

        let code = generate_code();
        let record = repo
            .create(CreateOtpParams {
                identifier: identifier.to_string(),
                channel,
                purpose,
                code_hash: hash_code(&code),
                expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
                created_at: now,
            })
            .await?;
        txn.commit().await?;

        let driver_repo = DriverRepository::new(self.db);
        let (template, recipient, driver) = match channel {
            Channel::Sms => (
                OTP_CODE_TEMPLATE,
                Recipient {
                    phone: Some(identifier.to_string()),
                    email: None,
                },
                driver_repo.find_by_phone(identifier).await?,
            ),
            Channel::Email => (
                OTP_EMAIL_TEMPLATE,
                Recipient {
                    phone: None,
                    email: Some(identifier.to_string()),
                },
                driver_repo.find_by_email(identifier).await?,
            ),
        };
        let name = driver.map_or_else(|| "there".to_string(), |d| d.first_name);
        self.notifier.dispatch(
            template,
            recipient,
            variables([
                ("name", name),
                ("code", code.clone()),
                ("minutes", OTP_TTL_MINUTES.to_string()),
            ]),
        );

        Ok(IssuedOtp { record, code })
    }

    /// Checks a code and, on success, stamps the matching driver contact as verified.
    ///
    /// # Returns
    /// - `Ok(OtpRecord)` - Verified record
    /// - `Err(AppError::Validation)` - Malformed identifier
    /// - `Err(OtpError::NoPendingCode)` - Nothing to verify
    /// - `Err(OtpError::TooManyAttempts)` - Code locked after repeated wrong guesses
    /// - `Err(OtpError::Expired)` - Code past its expiry
    /// - `Err(OtpError::InvalidCode)` - Wrong code, attempt counted
    pub async fn verify(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
        code: &str,
    ) -> Result<OtpRecord, AppError> {
        self.verify_at(identifier, purpose, code, Utc::now()).await
    }

    pub async fn verify_at(
        &self,
        identifier: &str,
        purpose: OtpPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<OtpRecord, AppError> {
        let identifier = normalize_identifier(identifier, purpose)?;
        let identifier = identifier.as_str();
        let repo = OtpRepository::new(self.db);

        let Some(record) = repo.find_latest_pending(identifier, purpose).await? else {
            return Err(OtpError::NoPendingCode.into());
        };

        if record.attempts >= MAX_ATTEMPTS {
            return Err(OtpError::TooManyAttempts.into());
        }

        if record.expires_at <= now {
            return Err(OtpError::Expired.into());
        }

        if hash_code(code.trim()) != record.code_hash {
            let attempts = record.attempts + 1;
            repo.set_attempts(record.id, attempts).await?;

            let remaining = MAX_ATTEMPTS - attempts;
            if remaining <= 0 {
                return Err(OtpError::TooManyAttempts.into());
            }
            return Err(OtpError::InvalidCode { remaining }.into());
        }

        let txn = self.db.begin().await?;
        OtpRepository::new(&txn).mark_verified(record.id, now).await?;
        DriverRepository::new(&txn)
            .mark_contact_verified(identifier, purpose, now)
            .await?;
        txn.commit().await?;

        tracing::info!("Verified {} for {}", purpose, identifier);

        Ok(OtpRecord {
            verified_at: Some(now),
            ..record
        })
    }

    /// Deletes codes that expired more than an hour before `now`.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        OtpRepository::new(self.db)
            .purge_expired_before(now - Duration::hours(1))
            .await
    }
}

/// Phone codes go out by SMS and email codes by email.
pub fn channel_for(purpose: OtpPurpose) -> Channel {
    match purpose {
        OtpPurpose::PhoneVerification => Channel::Sms,
        OtpPurpose::EmailVerification => Channel::Email,
    }
}

/// Normalizes a phone number or email the same way driver contacts are stored.
fn normalize_identifier(identifier: &str, purpose: OtpPurpose) -> Result<String, AppError> {
    match purpose {
        OtpPurpose::PhoneVerification => parse::phone(identifier.to_string()),
        OtpPurpose::EmailVerification => parse::email(identifier.to_string()),
    }
}

pub fn hash_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}

fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_six_digit_codes() {
        let code = generate_code();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn hashes_codes_as_sha256_hex() {
        assert_eq!(
            hash_code("123456"),
            "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92"
        );
    }
}
