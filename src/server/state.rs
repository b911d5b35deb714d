//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction. Every field is cheap to clone: the database handle is a pool, the
//! caches and the notifier share their internals through `Arc`.

use std::{path::PathBuf, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::server::{
    config::WebhookSecrets,
    service::{
        notification::Notifier, permission_cache::PermissionCache, provider::Providers,
        setup_code::SetupCodeService,
    },
};

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the SQLite database.
    pub db: DatabaseConnection,

    /// Effective admin permissions, invalidated by role and admin changes.
    pub permission_cache: PermissionCache,

    /// One-time code that lets the first Super Admin be created.
    pub setup_codes: SetupCodeService,

    /// Sends templated SMS and email in the background.
    pub notifier: Notifier,

    /// SMS, email, OCR and identity providers selected from configuration.
    pub providers: Providers,

    /// Root directory for uploaded KYC documents.
    pub upload_dir: Arc<PathBuf>,

    /// Public base URL, used for the setup link.
    pub app_url: String,

    pub webhooks: Arc<WebhookSecrets>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        setup_codes: SetupCodeService,
        providers: Providers,
        upload_dir: PathBuf,
        app_url: String,
        webhooks: WebhookSecrets,
    ) -> Self {
        let notifier = Notifier::new(db.clone(), &providers);

        Self {
            db,
            permission_cache: PermissionCache::new(),
            setup_codes,
            notifier,
            providers,
            upload_dir: Arc::new(upload_dir),
            app_url,
            webhooks: Arc::new(webhooks),
        }
    }
}
