use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PageDto},
        notification::{
            CreateNotificationTemplateDto, NotificationLogDto, NotificationTemplateDto,
            PreviewTemplateDto, RenderedTemplateDto, UpdateNotificationTemplateDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::notification::{
            NotificationLogEntry, NotificationTemplate, NotificationTemplateParams,
        },
        service::notification::template::NotificationTemplateService,
        state::AppState,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

/// List every notification template.
///
/// # Access Control
/// - `notifications.manage`
#[utoipa::path(
    get,
    path = "/api/admin/notification-templates",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "All templates", body = Vec<NotificationTemplateDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_templates(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::NotificationsManage])
        .await?;

    let templates = NotificationTemplateService::new(&state.db)
        .get_all()
        .await?
        .into_iter()
        .map(NotificationTemplate::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(templates)))
}

#[utoipa::path(
    get,
    path = "/api/admin/notification-templates/{id}",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template", body = NotificationTemplateDto),
        (status = 404, description = "Template not found", body = ErrorDto)
    ),
)]
pub async fn get_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::NotificationsManage])
        .await?;

    let template = NotificationTemplateService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(template.into_dto())))
}

/// Create a template. Email templates need a subject.
///
/// # Access Control
/// - `notifications.manage`
///
/// # Returns
/// - `201 Created` - Template created
/// - `409 Conflict` - Key and channel already used
/// - `422 Unprocessable Entity` - Invalid key, empty body or missing subject
#[utoipa::path(
    post,
    path = "/api/admin/notification-templates",
    tag = NOTIFICATION_TAG,
    request_body = CreateNotificationTemplateDto,
    responses(
        (status = 201, description = "Template created", body = NotificationTemplateDto),
        (status = 409, description = "Template already exists", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn create_template(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateNotificationTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::NotificationsManage])
        .await?;

    let template = NotificationTemplateService::new(&state.db)
        .create(NotificationTemplateParams {
            key: payload.key,
            channel: payload.channel,
            subject: payload.subject,
            body: payload.body,
            is_active: payload.is_active,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(template.into_dto())))
}

/// Update a template. The key cannot change.
///
/// # Access Control
/// - `notifications.manage`
#[utoipa::path(
    put,
    path = "/api/admin/notification-templates/{id}",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Template ID")),
    request_body = UpdateNotificationTemplateDto,
    responses(
        (status = 200, description = "Template updated", body = NotificationTemplateDto),
        (status = 404, description = "Template not found", body = ErrorDto),
        (status = 409, description = "Template already exists", body = ErrorDto),
        (status = 422, description = "Invalid input", body = ErrorDto)
    ),
)]
pub async fn update_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateNotificationTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::NotificationsManage])
        .await?;

    let template = NotificationTemplateService::new(&state.db)
        .update(
            id,
            NotificationTemplateParams {
                key: String::new(),
                channel: payload.channel,
                subject: payload.subject,
                body: payload.body,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(template.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/admin/notification-templates/{id}",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 404, description = "Template not found", body = ErrorDto)
    ),
)]
pub async fn delete_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::NotificationsManage])
        .await?;

    NotificationTemplateService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Render a template with sample variables. Nothing is sent.
///
/// # Access Control
/// - `notifications.manage`
#[utoipa::path(
    post,
    path = "/api/admin/notification-templates/{id}/preview",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Template ID")),
    request_body = PreviewTemplateDto,
    responses(
        (status = 200, description = "Rendered template", body = RenderedTemplateDto),
        (status = 404, description = "Template not found", body = ErrorDto)
    ),
)]
pub async fn preview_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<PreviewTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::NotificationsManage])
        .await?;

    let rendered = NotificationTemplateService::new(&state.db)
        .preview(id, &payload.variables)
        .await?;

    Ok((
        StatusCode::OK,
        Json(RenderedTemplateDto {
            subject: rendered.subject,
            body: rendered.body,
        }),
    ))
}

/// List sent and failed notifications, newest first.
///
/// # Access Control
/// - `notifications.manage`
#[utoipa::path(
    get,
    path = "/api/admin/notification-log",
    tag = NOTIFICATION_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of log entries", body = PageDto<NotificationLogDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_log(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::NotificationsManage])
        .await?;

    let log = NotificationTemplateService::new(&state.db)
        .get_log(pagination.page, pagination.entries())
        .await?;

    Ok((StatusCode::OK, Json(log.into_dto(NotificationLogEntry::into_dto))))
}
