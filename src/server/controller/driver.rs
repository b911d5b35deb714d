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
        api::{AffectedDto, ErrorDto, PageDto},
        driver::{BulkDriverActionDto, CreateDriverDto, DriverDetailDto, DriverDto, UpdateDriverDto},
        kyc::{ApproveDriverDto, RejectDriverDto},
        status::{DriverStatus, VerificationStatus},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::driver::{Driver, DriverFilter, UpdateDriverParams},
        service::{
            driver::{DriverService, NewDriver},
            verification::VerificationService,
        },
        state::AppState,
    },
};

/// Tag for grouping admin driver endpoints in OpenAPI documentation
pub static DRIVER_TAG: &str = "driver";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DriverFilterParams {
    /// Substring match on name, email or phone
    pub search: Option<String>,
    pub status: Option<DriverStatus>,
    pub verification_status: Option<VerificationStatus>,
    /// Only drivers that are (or are not) free for matching
    pub available: Option<bool>,
}

/// List drivers.
///
/// # Access Control
/// - `drivers.view`
#[utoipa::path(
    get,
    path = "/api/admin/drivers",
    tag = DRIVER_TAG,
    params(PaginationParams, DriverFilterParams),
    responses(
        (status = 200, description = "Page of drivers", body = PageDto<DriverDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_drivers(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<DriverFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DriversView])
        .await?;

    let filter = DriverFilter {
        search: filter.search,
        status: filter.status,
        verification_status: filter.verification_status,
        available: filter.available,
    };

    let drivers = DriverService::new(&state.db, &state.upload_dir)
        .get_paginated(filter, pagination.page, pagination.entries())
        .await?;

    Ok((StatusCode::OK, Json(drivers.into_dto(Driver::into_dto))))
}

/// Get a driver with documents and verification history.
///
/// # Access Control
/// - `drivers.view`
#[utoipa::path(
    get,
    path = "/api/admin/drivers/{id}",
    tag = DRIVER_TAG,
    params(("id" = i32, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Driver", body = DriverDetailDto),
        (status = 404, description = "Driver not found", body = ErrorDto)
    ),
)]
pub async fn get_driver(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DriversView])
        .await?;

    let driver = DriverService::new(&state.db, &state.upload_dir)
        .get(id)
        .await?;

    Ok((StatusCode::OK, Json(driver.into_dto())))
}

/// Create a driver on their behalf.
///
/// # Access Control
/// - `drivers.manage`
///
/// # Returns
/// - `201 Created` - Driver created
/// - `409 Conflict` - Email or phone already registered
/// - `422 Unprocessable Entity` - Invalid field
#[utoipa::path(
    post,
    path = "/api/admin/drivers",
    tag = DRIVER_TAG,
    request_body = CreateDriverDto,
    responses(
        (status = 201, description = "Driver created", body = DriverDto),
        (status = 409, description = "Email or phone already registered", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn create_driver(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateDriverDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DriversManage])
        .await?;

    let driver = DriverService::new(&state.db, &state.upload_dir)
        .create(NewDriver {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            password: payload.password,
            city: payload.city,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(driver.into_dto())))
}

/// Update a driver's contact details and account status.
///
/// # Access Control
/// - `drivers.manage`
#[utoipa::path(
    put,
    path = "/api/admin/drivers/{id}",
    tag = DRIVER_TAG,
    params(("id" = i32, Path, description = "Driver ID")),
    request_body = UpdateDriverDto,
    responses(
        (status = 200, description = "Driver updated", body = DriverDto),
        (status = 404, description = "Driver not found", body = ErrorDto),
        (status = 409, description = "Email or phone already registered", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn update_driver(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateDriverDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DriversManage])
        .await?;

    let driver = DriverService::new(&state.db, &state.upload_dir)
        .update(UpdateDriverParams {
            id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            city: payload.city,
            status: payload.status,
        })
        .await?;

    Ok((StatusCode::OK, Json(driver.into_dto())))
}

/// Delete a driver together with their documents and matches.
///
/// # Access Control
/// - `drivers.manage`
#[utoipa::path(
    delete,
    path = "/api/admin/drivers/{id}",
    tag = DRIVER_TAG,
    params(("id" = i32, Path, description = "Driver ID")),
    responses(
        (status = 204, description = "Driver deleted"),
        (status = 404, description = "Driver not found", body = ErrorDto)
    ),
)]
pub async fn delete_driver(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DriversManage])
        .await?;

    DriverService::new(&state.db, &state.upload_dir)
        .delete(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Apply one action to many drivers. Unknown IDs are skipped.
///
/// # Access Control
/// - `drivers.manage`
#[utoipa::path(
    post,
    path = "/api/admin/drivers/bulk",
    tag = DRIVER_TAG,
    request_body = BulkDriverActionDto,
    responses(
        (status = 200, description = "Number of drivers changed", body = AffectedDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn bulk_drivers(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BulkDriverActionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DriversManage])
        .await?;

    let affected = DriverService::new(&state.db, &state.upload_dir)
        .bulk(payload.action, payload.ids)
        .await?;

    Ok((StatusCode::OK, Json(AffectedDto { affected })))
}

/// Approve a driver whose KYC is pending review.
///
/// The reviewing admin confirms with their own password.
///
/// # Access Control
/// - `drivers.verify`
///
/// # Returns
/// - `200 OK` - Driver verified
/// - `403 Forbidden` - Password confirmation failed
/// - `409 Conflict` - Driver is not pending review
#[utoipa::path(
    post,
    path = "/api/admin/drivers/{id}/approve",
    tag = DRIVER_TAG,
    params(("id" = i32, Path, description = "Driver ID")),
    request_body = ApproveDriverDto,
    responses(
        (status = 200, description = "Driver verified", body = DriverDto),
        (status = 403, description = "Password confirmation failed", body = ErrorDto),
        (status = 404, description = "Driver not found", body = ErrorDto),
        (status = 409, description = "Driver not pending review", body = ErrorDto)
    ),
)]
pub async fn approve_driver(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<ApproveDriverDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DriversVerify])
        .await?;

    let driver = VerificationService::new(&state.db, &state.notifier)
        .approve(&access.admin, id, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(driver.into_dto())))
}

/// Reject a driver's KYC with a reason.
///
/// Cancels the driver's active matches and sends them back to the first KYC step.
///
/// # Access Control
/// - `drivers.verify`
///
/// # Returns
/// - `200 OK` - Driver rejected
/// - `403 Forbidden` - Password confirmation failed
/// - `422 Unprocessable Entity` - Reason missing
#[utoipa::path(
    post,
    path = "/api/admin/drivers/{id}/reject",
    tag = DRIVER_TAG,
    params(("id" = i32, Path, description = "Driver ID")),
    request_body = RejectDriverDto,
    responses(
        (status = 200, description = "Driver rejected", body = DriverDto),
        (status = 403, description = "Password confirmation failed", body = ErrorDto),
        (status = 404, description = "Driver not found", body = ErrorDto),
        (status = 422, description = "Reason missing", body = ErrorDto)
    ),
)]
pub async fn reject_driver(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<RejectDriverDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::DriversVerify])
        .await?;

    let driver = VerificationService::new(&state.db, &state.notifier)
        .reject(&access.admin, id, &payload.password, payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(driver.into_dto())))
}
