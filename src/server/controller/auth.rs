use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        admin::{ChangePasswordDto, CurrentAdminDto, LoginDto},
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AdminSession},
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping admin authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Log an admin in with email and password.
///
/// # Returns
/// - `200 OK` - Logged in; returns the admin and their effective permissions
/// - `401 Unauthorized` - Wrong email or password, or account inactive
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = CurrentAdminDto),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.permission_cache);

    let admin = service.login(&payload.email, &payload.password).await?;
    AdminSession::new(&session).set_admin_id(admin.id).await?;

    let (admin, permissions) = service.current(admin.id).await?;

    Ok((
        StatusCode::OK,
        Json(admin.into_current_dto(permissions.keys(), permissions.is_super_admin)),
    ))
}

/// Log the current admin out.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out")
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AdminSession::new(&session).logout().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged in admin with roles and effective permissions.
///
/// # Returns
/// - `200 OK` - Current admin
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current admin", body = CurrentAdminDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[])
        .await?;

    let (admin, permissions) = AuthService::new(&state.db, &state.permission_cache)
        .current(access.id())
        .await?;

    Ok((
        StatusCode::OK,
        Json(admin.into_current_dto(permissions.keys(), permissions.is_super_admin)),
    ))
}

/// Change the logged in admin's password.
///
/// # Returns
/// - `204 No Content` - Password changed
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Current password wrong
/// - `422 Unprocessable Entity` - New password too short
#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Current password wrong", body = ErrorDto),
        (status = 422, description = "New password too short", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.permission_cache)
        .change_password(
            &access.admin,
            &payload.current_password,
            &payload.new_password,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
