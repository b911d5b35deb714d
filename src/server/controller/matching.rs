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
        matching::{AutoMatchResultDto, CreateMatchDto, MatchDto},
        status::MatchStatus,
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::driver_match::{DriverMatch, MatchFilter},
        service::matching::MatchingService,
        state::AppState,
    },
};

/// Tag for grouping match endpoints in OpenAPI documentation
pub static MATCH_TAG: &str = "match";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchFilterParams {
    pub status: Option<MatchStatus>,
    pub request_id: Option<i32>,
    pub driver_id: Option<i32>,
}

/// List matches, newest first.
///
/// # Access Control
/// - `matches.view`
#[utoipa::path(
    get,
    path = "/api/admin/matches",
    tag = MATCH_TAG,
    params(PaginationParams, MatchFilterParams),
    responses(
        (status = 200, description = "Page of matches", body = PageDto<MatchDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_matches(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<MatchFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::MatchesView])
        .await?;

    let matches = MatchingService::new(&state.db, &state.notifier)
        .get_paginated(
            MatchFilter {
                status: filter.status,
                company_request_id: filter.request_id,
                driver_id: filter.driver_id,
            },
            pagination.page,
            pagination.entries(),
        )
        .await?;

    Ok((StatusCode::OK, Json(matches.into_dto(DriverMatch::into_dto))))
}

/// Assign a driver to a request by hand.
///
/// The driver receives the match as pending and must accept it.
///
/// # Access Control
/// - `matches.manage`
///
/// # Returns
/// - `201 Created` - Match created
/// - `404 Not Found` - Request or driver not found
/// - `409 Conflict` - Request full or closed, or driver not available
#[utoipa::path(
    post,
    path = "/api/admin/matches",
    tag = MATCH_TAG,
    request_body = CreateMatchDto,
    responses(
        (status = 201, description = "Match created", body = MatchDto),
        (status = 404, description = "Request or driver not found", body = ErrorDto),
        (status = 409, description = "Request full or driver unavailable", body = ErrorDto)
    ),
)]
pub async fn create_match(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateMatchDto>,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::MatchesManage])
        .await?;

    let assignment = MatchingService::new(&state.db, &state.notifier)
        .create_manual(access.id(), payload.request_id, payload.driver_id)
        .await?;

    Ok((StatusCode::CREATED, Json(assignment.into_dto())))
}

/// Fill open requests with available drivers, oldest request first.
///
/// # Access Control
/// - `matches.manage`
#[utoipa::path(
    post,
    path = "/api/admin/matches/auto",
    tag = MATCH_TAG,
    responses(
        (status = 200, description = "Auto-match finished", body = AutoMatchResultDto),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn auto_match(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let access = AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::MatchesManage])
        .await?;

    let summary = MatchingService::new(&state.db, &state.notifier)
        .auto_match(Some(access.id()))
        .await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

/// Cancel a pending or accepted match.
///
/// # Access Control
/// - `matches.manage`
#[utoipa::path(
    post,
    path = "/api/admin/matches/{id}/cancel",
    tag = MATCH_TAG,
    params(("id" = i32, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match cancelled", body = MatchDto),
        (status = 404, description = "Match not found", body = ErrorDto),
        (status = 409, description = "Match no longer active", body = ErrorDto)
    ),
)]
pub async fn cancel_match(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::MatchesManage])
        .await?;

    let assignment = MatchingService::new(&state.db, &state.notifier)
        .cancel(id)
        .await?;

    Ok((StatusCode::OK, Json(assignment.into_dto())))
}

/// Complete an accepted match.
///
/// # Access Control
/// - `matches.manage`
#[utoipa::path(
    post,
    path = "/api/admin/matches/{id}/complete",
    tag = MATCH_TAG,
    params(("id" = i32, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match completed", body = MatchDto),
        (status = 404, description = "Match not found", body = ErrorDto),
        (status = 409, description = "Match not accepted", body = ErrorDto)
    ),
)]
pub async fn complete_match(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::MatchesManage])
        .await?;

    let assignment = MatchingService::new(&state.db, &state.notifier)
        .complete(id)
        .await?;

    Ok((StatusCode::OK, Json(assignment.into_dto())))
}
