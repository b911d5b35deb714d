use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        admin::{AdminUserDto, SetupDto},
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::session::AdminSession,
        service::auth::{AuthService, SetupParams},
        state::AppState,
    },
};

/// Tag for grouping setup endpoints in OpenAPI documentation
pub static SETUP_TAG: &str = "setup";

/// Create the first Super Admin.
///
/// Only works while no active Super Admin exists, using the one-time code logged at
/// startup. The new admin is logged in immediately.
///
/// # Returns
/// - `201 Created` - Super Admin created and logged in
/// - `401 Unauthorized` - Setup code wrong, expired or used
/// - `409 Conflict` - Setup already completed or email in use
/// - `422 Unprocessable Entity` - Invalid name, email or password
#[utoipa::path(
    post,
    path = "/api/setup",
    tag = SETUP_TAG,
    request_body = SetupDto,
    responses(
        (status = 201, description = "Super Admin created", body = AdminUserDto),
        (status = 401, description = "Invalid setup code", body = ErrorDto),
        (status = 409, description = "Setup already completed", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn setup(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SetupDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.permission_cache);

    let admin = service
        .setup(
            &state.setup_codes,
            SetupParams {
                code: payload.code,
                name: payload.name,
                email: payload.email,
                password: payload.password,
            },
        )
        .await?;

    AdminSession::new(&session).set_admin_id(admin.id).await?;

    let (admin, _) = service.current(admin.id).await?;

    Ok((StatusCode::CREATED, Json(admin.into_dto())))
}
