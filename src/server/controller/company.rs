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
        company::{CompanyDetailDto, CompanyDto, CompanyFormDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::company::{Company, CompanyFilter, CompanyParams},
        service::company::CompanyService,
        state::AppState,
    },
};

/// Tag for grouping company endpoints in OpenAPI documentation
pub static COMPANY_TAG: &str = "company";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyFilterParams {
    /// Substring match on name, email or contact person
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl From<CompanyFormDto> for CompanyParams {
    fn from(dto: CompanyFormDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            address: dto.address,
            contact_person: dto.contact_person,
        }
    }
}

/// List client companies.
///
/// # Access Control
/// - `companies.view`
#[utoipa::path(
    get,
    path = "/api/admin/companies",
    tag = COMPANY_TAG,
    params(PaginationParams, CompanyFilterParams),
    responses(
        (status = 200, description = "Page of companies", body = PageDto<CompanyDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_companies(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<CompanyFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::CompaniesView])
        .await?;

    let companies = CompanyService::new(&state.db)
        .get_paginated(
            CompanyFilter {
                search: filter.search,
                is_active: filter.is_active,
            },
            pagination.page,
            pagination.entries(),
        )
        .await?;

    Ok((StatusCode::OK, Json(companies.into_dto(Company::into_dto))))
}

/// Get a company with its request counts.
///
/// # Access Control
/// - `companies.view`
#[utoipa::path(
    get,
    path = "/api/admin/companies/{id}",
    tag = COMPANY_TAG,
    params(("id" = i32, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company", body = CompanyDetailDto),
        (status = 404, description = "Company not found", body = ErrorDto)
    ),
)]
pub async fn get_company(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::CompaniesView])
        .await?;

    let company = CompanyService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(company.into_dto())))
}

/// Create a company.
///
/// # Access Control
/// - `companies.manage`
///
/// # Returns
/// - `201 Created` - Company created
/// - `409 Conflict` - Email already in use
/// - `422 Unprocessable Entity` - Invalid field
#[utoipa::path(
    post,
    path = "/api/admin/companies",
    tag = COMPANY_TAG,
    request_body = CompanyFormDto,
    responses(
        (status = 201, description = "Company created", body = CompanyDto),
        (status = 409, description = "Email already in use", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn create_company(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CompanyFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::CompaniesManage])
        .await?;

    let company = CompanyService::new(&state.db)
        .create(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(company.into_dto())))
}

/// Update a company.
///
/// # Access Control
/// - `companies.manage`
#[utoipa::path(
    put,
    path = "/api/admin/companies/{id}",
    tag = COMPANY_TAG,
    params(("id" = i32, Path, description = "Company ID")),
    request_body = CompanyFormDto,
    responses(
        (status = 200, description = "Company updated", body = CompanyDto),
        (status = 404, description = "Company not found", body = ErrorDto),
        (status = 409, description = "Email already in use", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn update_company(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CompanyFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::CompaniesManage])
        .await?;

    let company = CompanyService::new(&state.db)
        .update(id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(company.into_dto())))
}

/// Flip a company between active and inactive.
///
/// Inactive companies cannot open new requests.
///
/// # Access Control
/// - `companies.manage`
#[utoipa::path(
    post,
    path = "/api/admin/companies/{id}/toggle-active",
    tag = COMPANY_TAG,
    params(("id" = i32, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company toggled", body = CompanyDto),
        (status = 404, description = "Company not found", body = ErrorDto)
    ),
)]
pub async fn toggle_company(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::CompaniesManage])
        .await?;

    let company = CompanyService::new(&state.db).toggle_active(id).await?;

    Ok((StatusCode::OK, Json(company.into_dto())))
}

/// Delete a company with its requests and their matches.
///
/// # Access Control
/// - `companies.manage`
#[utoipa::path(
    delete,
    path = "/api/admin/companies/{id}",
    tag = COMPANY_TAG,
    params(("id" = i32, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found", body = ErrorDto)
    ),
)]
pub async fn delete_company(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::CompaniesManage])
        .await?;

    CompanyService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
