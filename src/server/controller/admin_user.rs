use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        admin::{AdminUserDto, CreateAdminUserDto, UpdateAdminUserDto},
        api::{ErrorDto, PageDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::admin::{AdminWithRoles, UpdateAdminUserParams},
        service::admin_user::{AdminUserService, NewAdminUser},
        state::AppState,
    },
};

/// Tag for grouping admin user endpoints in OpenAPI documentation
pub static ADMIN_USER_TAG: &str = "admin_user";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminSearchParams {
    /// Substring match on name or email
    pub search: Option<String>,
}

/// List admins with their roles.
///
/// # Access Control
/// - `admins.manage`
#[utoipa::path(
    get,
    path = "/api/admin/admins",
    tag = ADMIN_USER_TAG,
    params(PaginationParams, AdminSearchParams),
    responses(
        (status = 200, description = "Page of admins", body = PageDto<AdminUserDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_admins(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<AdminSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::AdminsManage])
        .await?;

    let admins = AdminUserService::new(&state.db, &state.permission_cache)
        .get_paginated(params.search, pagination.page, pagination.entries())
        .await?;

    Ok((StatusCode::OK, Json(admins.into_dto(AdminWithRoles::into_dto))))
}

/// Get one admin.
///
/// # Access Control
/// - `admins.manage`
#[utoipa::path(
    get,
    path = "/api/admin/admins/{id}",
    tag = ADMIN_USER_TAG,
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin", body = AdminUserDto),
        (status = 404, description = "Admin not found", body = ErrorDto)
    ),
)]
pub async fn get_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::AdminsManage])
        .await?;

    let admin = AdminUserService::new(&state.db, &state.permission_cache)
        .get(id)
        .await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Create an admin with the given roles.
///
/// Every assigned role must sit below the acting admin's level.
///
/// # Access Control
/// - `admins.manage`
///
/// # Returns
/// - `201 Created` - Admin created
/// - `403 Forbidden` - A role is not below the actor's level
/// - `409 Conflict` - Email already in use
/// - `422 Unprocessable Entity` - Invalid name, email, password or role
#[utoipa::path(
    post,
    path = "/api/admin/admins",
    tag = ADMIN_USER_TAG,
    request_body = CreateAdminUserDto,
    responses(
        (status = 201, description = "Admin created", body = AdminUserDto),
        (status = 403, description = "Insufficient level", body = ErrorDto),
        (status = 409, description = "Email already in use", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn create_admin(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAdminUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::AdminsManage])
        .await?;

    let admin = AdminUserService::new(&state.db, &state.permission_cache)
        .create(
            &access,
            NewAdminUser {
                name: payload.name,
                email: payload.email,
                password: payload.password,
                role_ids: payload.role_ids,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(admin.into_dto())))
}

/// Update an admin and replace their roles.
///
/// # Access Control
/// - `admins.manage`
///
/// # Returns
/// - `200 OK` - Admin updated
/// - `403 Forbidden` - Target or a role not below the actor, or the last Super Admin
///   would be removed
/// - `404 Not Found` - Admin not found
#[utoipa::path(
    put,
    path = "/api/admin/admins/{id}",
    tag = ADMIN_USER_TAG,
    params(("id" = i32, Path, description = "Admin ID")),
    request_body = UpdateAdminUserDto,
    responses(
        (status = 200, description = "Admin updated", body = AdminUserDto),
        (status = 403, description = "Insufficient level or last Super Admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 409, description = "Email already in use", body = ErrorDto)
    ),
)]
pub async fn update_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAdminUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::AdminsManage])
        .await?;

    let admin = AdminUserService::new(&state.db, &state.permission_cache)
        .update(
            &access,
            UpdateAdminUserParams {
                id,
                name: payload.name,
                email: payload.email,
                is_active: payload.is_active,
                role_ids: payload.role_ids,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Delete an admin.
///
/// # Access Control
/// - `admins.manage`
#[utoipa::path(
    delete,
    path = "/api/admin/admins/{id}",
    tag = ADMIN_USER_TAG,
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 400, description = "Cannot delete own account", body = ErrorDto),
        (status = 403, description = "Insufficient level or last Super Admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto)
    ),
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::AdminsManage])
        .await?;

    AdminUserService::new(&state.db, &state.permission_cache)
        .delete(&access, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
