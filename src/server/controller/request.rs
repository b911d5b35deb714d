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
        api::{ErrorDto, PageDto},
        request::{
            CompanyRequestDetailDto, CompanyRequestDto, CreateCompanyRequestDto,
            UpdateCompanyRequestDto,
        },
        status::RequestStatus,
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::company_request::{
            CompanyRequest, CompanyRequestFilter, CreateCompanyRequestParams,
            UpdateCompanyRequestParams,
        },
        service::company_request::CompanyRequestService,
        state::AppState,
    },
};

/// Tag for grouping company request endpoints in OpenAPI documentation
pub static REQUEST_TAG: &str = "request";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestFilterParams {
    pub company_id: Option<i32>,
    pub status: Option<RequestStatus>,
}

/// List company requests, newest first.
///
/// # Access Control
/// - `requests.view`
#[utoipa::path(
    get,
    path = "/api/admin/requests",
    tag = REQUEST_TAG,
    params(PaginationParams, RequestFilterParams),
    responses(
        (status = 200, description = "Page of requests", body = PageDto<CompanyRequestDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_requests(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<RequestFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RequestsView])
        .await?;

    let requests = CompanyRequestService::new(&state.db)
        .get_paginated(
            CompanyRequestFilter {
                company_id: filter.company_id,
                status: filter.status,
            },
            pagination.page,
            pagination.entries(),
        )
        .await?;

    Ok((StatusCode::OK, Json(requests.into_dto(CompanyRequest::into_dto))))
}

/// Get a request with its matches.
///
/// # Access Control
/// - `requests.view`
#[utoipa::path(
    get,
    path = "/api/admin/requests/{id}",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request", body = CompanyRequestDetailDto),
        (status = 404, description = "Request not found", body = ErrorDto)
    ),
)]
pub async fn get_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RequestsView])
        .await?;

    let request = CompanyRequestService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Open a request for drivers on behalf of a company.
///
/// # Access Control
/// - `requests.manage`
///
/// # Returns
/// - `201 Created` - Request opened
/// - `404 Not Found` - Company not found
/// - `409 Conflict` - Company inactive
/// - `422 Unprocessable Entity` - Invalid field or `drivers_needed` below 1
#[utoipa::path(
    post,
    path = "/api/admin/requests",
    tag = REQUEST_TAG,
    request_body = CreateCompanyRequestDto,
    responses(
        (status = 201, description = "Request opened", body = CompanyRequestDto),
        (status = 404, description = "Company not found", body = ErrorDto),
        (status = 409, description = "Company inactive", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn create_request(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCompanyRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RequestsManage])
        .await?;

    let request = CompanyRequestService::new(&state.db)
        .create(CreateCompanyRequestParams {
            company_id: payload.company_id,
            title: payload.title,
            description: payload.description,
            location: payload.location,
            vehicle_type: payload.vehicle_type,
            drivers_needed: payload.drivers_needed,
            start_date: payload.start_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(request.into_dto())))
}

/// Update an open request. The status follows the new driver count.
///
/// # Access Control
/// - `requests.manage`
#[utoipa::path(
    put,
    path = "/api/admin/requests/{id}",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateCompanyRequestDto,
    responses(
        (status = 200, description = "Request updated", body = CompanyRequestDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 409, description = "Request completed or cancelled", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn update_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCompanyRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RequestsManage])
        .await?;

    let request = CompanyRequestService::new(&state.db)
        .update(UpdateCompanyRequestParams {
            id,
            title: payload.title,
            description: payload.description,
            location: payload.location,
            vehicle_type: payload.vehicle_type,
            drivers_needed: payload.drivers_needed,
            start_date: payload.start_date,
        })
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Cancel a request and every active match on it.
///
/// # Access Control
/// - `requests.manage`
#[utoipa::path(
    post,
    path = "/api/admin/requests/{id}/cancel",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request cancelled", body = CompanyRequestDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 409, description = "Request already completed or cancelled", body = ErrorDto)
    ),
)]
pub async fn cancel_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RequestsManage])
        .await?;

    let request = CompanyRequestService::new(&state.db).cancel(id).await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Complete a request. Accepted matches complete, pending ones are cancelled.
///
/// # Access Control
/// - `requests.manage`
#[utoipa::path(
    post,
    path = "/api/admin/requests/{id}/complete",
    tag = REQUEST_TAG,
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request completed", body = CompanyRequestDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 409, description = "Request already completed or cancelled", body = ErrorDto)
    ),
)]
pub async fn complete_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::RequestsManage])
        .await?;

    let request = CompanyRequestService::new(&state.db).complete(id).await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}
