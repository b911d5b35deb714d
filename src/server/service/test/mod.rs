//! Service tests.
//!
//! Providers are replaced by recording fakes so tests can assert on what would have been
//! delivered without any network access.

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::server::{
    data::admin_user::AdminUserRepository,
    error::{provider::ProviderError, AppError},
    middleware::auth::AdminAccess,
    service::{
        permission_cache::PermissionCache,
        provider::{EmailProvider, Providers, SmsProvider},
    },
};

mod admin_user;
mod company;
mod kyc;
mod matching;
mod role;
mod seed;
mod verification;

/// Message captured by a recording provider: `(to, subject, body)`.
pub type Sent = (String, Option<String>, String);

#[derive(Clone, Default)]
pub struct RecordingProvider {
    pub sent: Arc<Mutex<Vec<Sent>>>,
    pub fail: bool,
}

impl RecordingProvider {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, to: &str, subject: Option<&str>, body: &str) -> Result<(), ProviderError> {
        if self.fail {
            return Err(ProviderError::Status {
                provider: "recording",
                status: 503,
                body: "unavailable".to_string(),
            });
        }

        self.sent.lock().unwrap().push((
            to.to_string(),
            subject.map(str::to_string),
            body.to_string(),
        ));
        Ok(())
    }
}

#[async_trait]
impl SmsProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send_sms(&self, to: &str, body: &str) -> Result<(), ProviderError> {
        self.record(to, None, body)
    }
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), ProviderError> {
        self.record(to, Some(subject), body)
    }
}

/// Waits for background dispatches until `recorder` holds at least `count` messages.
pub async fn wait_for_sent(recorder: &RecordingProvider, count: usize) -> Vec<Sent> {
    for _ in 0..200 {
        if recorder.sent().len() >= count {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    recorder.sent()
}

/// Opens an in-memory database with every migration applied, seed data included.
pub async fn migrated_db() -> Result<DatabaseConnection, AppError> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Providers delivering SMS and email to `recorder`.
pub fn recording_providers(recorder: &RecordingProvider) -> Providers {
    Providers {
        sms: Arc::new(recorder.clone()),
        email: Arc::new(recorder.clone()),
        ocr: None,
        identity: None,
    }
}

/// Builds the access an authenticated admin would receive from the auth guard.
pub async fn access_for(
    db: &DatabaseConnection,
    cache: &PermissionCache,
    admin_id: i32,
) -> Result<AdminAccess, AppError> {
    let admin = AdminUserRepository::new(db)
        .find_by_id(admin_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Admin {} not found", admin_id)))?;
    let permissions = cache.get_or_load(db, admin_id).await?;

    Ok(AdminAccess { admin, permissions })
}
