use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, integration::IntegrationsDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        state::AppState,
    },
};

/// Tag for grouping integration endpoints in OpenAPI documentation
pub static INTEGRATION_TAG: &str = "integration";

/// Show which external providers are configured.
///
/// Covers SMS, email, OCR, identity verification and each payment webhook secret.
/// Credentials are never returned.
///
/// # Access Control
/// - `integrations.view`
#[utoipa::path(
    get,
    path = "/api/admin/integrations",
    tag = INTEGRATION_TAG,
    responses(
        (status = 200, description = "Provider status", body = IntegrationsDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_integrations(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::IntegrationsView])
        .await?;

    let integrations = state.providers.status(&state.webhooks);

    Ok((StatusCode::OK, Json(IntegrationsDto { integrations })))
}
