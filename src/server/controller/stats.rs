use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, stats::StatsDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::{export::ExportService, stats::StatsService},
        state::AppState,
    },
};

/// Tag for grouping dashboard and export endpoints in OpenAPI documentation
pub static STATS_TAG: &str = "stats";

/// Dashboard counters for drivers, companies, requests and matches.
///
/// # Access Control
/// - `dashboard.view`
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Dashboard counters", body = StatsDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DashboardView])
        .await?;

    let stats = StatsService::new(&state.db).dashboard().await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

fn csv_response(file_name: &str, body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
}

/// Export every driver as CSV.
///
/// # Access Control
/// - `reports.export`
#[utoipa::path(
    get,
    path = "/api/admin/export/drivers.csv",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Drivers CSV", body = String, content_type = "text/csv"),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn export_drivers(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::ReportsExport])
        .await?;

    let csv = ExportService::new(&state.db).drivers_csv().await?;

    Ok(csv_response("drivers.csv", csv))
}

/// Export every company as CSV.
///
/// # Access Control
/// - `reports.export`
#[utoipa::path(
    get,
    path = "/api/admin/export/companies.csv",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Companies CSV", body = String, content_type = "text/csv"),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn export_companies(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::ReportsExport])
        .await?;

    let csv = ExportService::new(&state.db).companies_csv().await?;

    Ok(csv_response("companies.csv", csv))
}

/// Export every match as CSV.
///
/// # Access Control
/// - `reports.export`
#[utoipa::path(
    get,
    path = "/api/admin/export/matches.csv",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Matches CSV", body = String, content_type = "text/csv"),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn export_matches(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::ReportsExport])
        .await?;

    let csv = ExportService::new(&state.db).matches_csv().await?;

    Ok(csv_response("matches.csv", csv))
}
