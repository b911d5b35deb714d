use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{matching::MatchingService, notification::Notifier, otp::OtpService},
};

/// Purge runs at minute 0 of every hour.
const OTP_PURGE_SCHEDULE: &str = "0 0 * * * *";

/// Starts the maintenance scheduler
///
/// Always schedules the hourly purge of expired OTP codes. When `auto_match_cron` is set,
/// an auto-match run is scheduled with that six-field cron expression as well.
///
/// # Arguments
/// - `db`: Database connection
/// - `notifier`: Delivers match notifications created by auto-match runs
/// - `auto_match_cron`: Optional schedule for unattended auto-matching
///
/// # Returns
/// - `Ok(())` - Scheduler started
/// - `Err(AppError::SchedulerErr)` - Invalid cron expression or scheduler failure
pub async fn start_scheduler(
    db: DatabaseConnection,
    notifier: Notifier,
    auto_match_cron: Option<String>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let purge_db = db.clone();
    let purge_notifier = notifier.clone();
    let purge_job = Job::new_async(OTP_PURGE_SCHEDULE, move |_uuid, _lock| {
        let db = purge_db.clone();
        let notifier = purge_notifier.clone();

        Box::pin(async move {
            match OtpService::new(&db, &notifier).purge_expired(Utc::now()).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!("Purged {} expired OTP codes", purged),
                Err(e) => tracing::error!("Error purging expired OTP codes: {}", e),
            }
        })
    })?;
    scheduler.add(purge_job).await?;

    if let Some(schedule) = auto_match_cron {
        let match_db = db.clone();
        let match_notifier = notifier.clone();
        let match_job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
            let db = match_db.clone();
            let notifier = match_notifier.clone();

            Box::pin(async move {
                match MatchingService::new(&db, &notifier).auto_match(None).await {
                    Ok(summary) => tracing::info!(
                        "Scheduled auto-match created {} matches over {} requests, {} unfilled",
                        summary.matches_created,
                        summary.requests_considered,
                        summary.unfilled_requests
                    ),
                    Err(e) => tracing::error!("Error running scheduled auto-match: {}", e),
                }
            })
        })?;
        scheduler.add(match_job).await?;

        tracing::info!("Auto-match scheduled with '{}'", schedule);
    }

    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}
