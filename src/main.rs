mod model;
mod server;

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, scheduler::maintenance,
    service::setup_code::SetupCodeService, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let providers = startup::build_providers(&config, &http_client);

    let upload_dir = PathBuf::from(&config.upload_dir);
    tokio::fs::create_dir_all(&upload_dir).await?;

    let setup_codes = SetupCodeService::new();

    // Print a setup link if no Super Admin exists yet
    startup::check_for_super_admin(&db, &config, &setup_codes).await?;

    let state = AppState::new(
        db,
        setup_codes,
        providers,
        upload_dir,
        config.app_url.clone(),
        config.webhooks.clone(),
    );

    maintenance::start_scheduler(
        state.db.clone(),
        state.notifier.clone(),
        config.auto_match_cron.clone(),
    )
    .await?;

    let app = server::router::router().with_state(state).layer(session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
