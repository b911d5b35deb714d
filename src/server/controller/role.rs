use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        role::{CreateRoleDto, PermissionDto, RoleDto, UpdateRoleDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::role::{self, RoleDetail, RoleParams},
        service::role::RoleService,
        state::AppState,
    },
};

/// Tag for grouping role endpoints in OpenAPI documentation
pub static ROLE_TAG: &str = "role";

/// List every role with its permission keys and admin count.
///
/// # Access Control
/// - `roles.manage`
#[utoipa::path(
    get,
    path = "/api/admin/roles",
    tag = ROLE_TAG,
    responses(
        (status = 200, description = "All roles", body = Vec<RoleDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RolesManage])
        .await?;

    let roles = RoleService::new(&state.db, &state.permission_cache)
        .get_all()
        .await?
        .into_iter()
        .map(RoleDetail::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(roles)))
}

/// Get one role.
///
/// # Access Control
/// - `roles.manage`
#[utoipa::path(
    get,
    path = "/api/admin/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = RoleDto),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
)]
pub async fn get_role(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RolesManage])
        .await?;

    let role = RoleService::new(&state.db, &state.permission_cache)
        .get(id)
        .await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Create a role.
///
/// The new role's level must sit below the acting admin's highest level unless they
/// are a Super Admin.
///
/// # Access Control
/// - `roles.manage`
///
/// # Returns
/// - `201 Created` - Role created
/// - `403 Forbidden` - Level not below the actor's
/// - `409 Conflict` - Name already in use
/// - `422 Unprocessable Entity` - Invalid name, level or unknown permission key
#[utoipa::path(
    post,
    path = "/api/admin/roles",
    tag = ROLE_TAG,
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = RoleDto),
        (status = 403, description = "Insufficient level", body = ErrorDto),
        (status = 409, description = "Name already in use", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn create_role(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RolesManage])
        .await?;

    let role = RoleService::new(&state.db, &state.permission_cache)
        .create(
            &access,
            RoleParams {
                name: payload.name,
                description: payload.description,
                level: payload.level,
                is_active: true,
                permissions: payload.permissions,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(role.into_dto())))
}

/// Update a role and replace its permissions.
///
/// # Access Control
/// - `roles.manage`
///
/// # Returns
/// - `200 OK` - Role updated
/// - `403 Forbidden` - Role is protected or not below the actor's level
/// - `404 Not Found` - Role not found
#[utoipa::path(
    put,
    path = "/api/admin/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = RoleDto),
        (status = 403, description = "Protected role or insufficient level", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn update_role(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RolesManage])
        .await?;

    let role = RoleService::new(&state.db, &state.permission_cache)
        .update(
            &access,
            id,
            RoleParams {
                name: payload.name,
                description: payload.description,
                level: payload.level,
                is_active: payload.is_active,
                permissions: payload.permissions,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Delete a role. Assigned admins lose it.
///
/// # Access Control
/// - `roles.manage`
#[utoipa::path(
    delete,
    path = "/api/admin/roles/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 403, description = "Protected role or insufficient level", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
)]
pub async fn delete_role(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RolesManage])
        .await?;

    RoleService::new(&state.db, &state.permission_cache)
        .delete(&access, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List every permission key that can be granted.
///
/// # Access Control
/// - `roles.manage`
#[utoipa::path(
    get,
    path = "/api/admin/permissions",
    tag = ROLE_TAG,
    responses(
        (status = 200, description = "All permissions", body = Vec<PermissionDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_permissions(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RolesManage])
        .await?;

    let permissions = RoleService::new(&state.db, &state.permission_cache)
        .get_permissions()
        .await?
        .into_iter()
        .map(role::Permission::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(permissions)))
}
