use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::admin_user::AdminUserRepository,
    error::AppError,
    service::{
        provider::{
            email::{HttpEmailProvider, LogEmailProvider},
            identity::HttpIdentityProvider,
            ocr::HttpOcrProvider,
            sms::{HttpSmsProvider, LogSmsProvider},
            EmailProvider, IdentityProvider, OcrProvider, Providers, SmsProvider,
        },
        setup_code::SetupCodeService,
    },
};

/// Timeout applied to every outgoing provider request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions live in their own table inside the same SQLite file and expire after seven
/// days of inactivity.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer to wrap the API router with
/// - `Err(AppError::DbErr)` - Session table migration failed
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7))))
}

/// Builds the HTTP client used by provider integrations.
///
/// Redirects are disabled so a provider URL cannot bounce requests to internal hosts.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(HTTP_TIMEOUT)
        .build()?)
}

/// Chooses provider implementations from configuration.
///
/// SMS and email fall back to providers that only log; OCR and identity verification are
/// disabled when not configured.
pub fn build_providers(config: &Config, http: &reqwest::Client) -> Providers {
    let sms: Arc<dyn SmsProvider> = match &config.sms {
        Some(sms) => Arc::new(HttpSmsProvider::new(http.clone(), sms.clone())),
        None => Arc::new(LogSmsProvider),
    };
    let email: Arc<dyn EmailProvider> = match &config.email {
        Some(email) => Arc::new(HttpEmailProvider::new(http.clone(), email.clone())),
        None => Arc::new(LogEmailProvider),
    };
    let ocr = config.ocr.clone().map(|endpoint| {
        Arc::new(HttpOcrProvider::new(http.clone(), endpoint)) as Arc<dyn OcrProvider>
    });
    let identity = config.identity.clone().map(|endpoint| {
        Arc::new(HttpIdentityProvider::new(http.clone(), endpoint)) as Arc<dyn IdentityProvider>
    });

    for (kind, configured) in [
        ("SMS", config.sms.is_some()),
        ("Email", config.email.is_some()),
        ("OCR", ocr.is_some()),
        ("Identity verification", identity.is_some()),
    ] {
        if !configured {
            tracing::warn!("{} provider not configured", kind);
        }
    }

    Providers {
        sms,
        email,
        ocr,
        identity,
    }
}

/// Generates a setup code when no active Super Admin exists.
///
/// The setup link is written to the log so whoever runs the server can create the first
/// Super Admin through `POST /api/setup`.
pub async fn check_for_super_admin(
    db: &DatabaseConnection,
    config: &Config,
    setup_codes: &SetupCodeService,
) -> Result<(), AppError> {
    if AdminUserRepository::new(db).super_admin_exists().await? {
        return Ok(());
    }

    let code = setup_codes.generate().await;
    tracing::info!(
        "No Super Admin exists. Complete setup at {}/setup?code={} (code expires in 15 minutes)",
        config.app_url.trim_end_matches('/'),
        code
    );

    Ok(())
}
