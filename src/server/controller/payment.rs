use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PageDto},
        payment::{PaymentTransactionDto, WebhookAckDto},
        status::{PaymentProvider, PaymentStatus},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::payment::{PaymentFilter, PaymentTransaction},
        service::payment::PaymentService,
        state::AppState,
    },
};

/// Tag for grouping payment endpoints in OpenAPI documentation
pub static PAYMENT_TAG: &str = "payment";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentFilterParams {
    pub provider: Option<PaymentProvider>,
    pub status: Option<PaymentStatus>,
}

/// Receive a payment provider webhook.
///
/// The raw body is checked against the provider's signature header before it is parsed.
/// Redelivered events update the stored transaction instead of duplicating it.
///
/// # Arguments
/// - `provider` - `paystack`, `flutterwave` or `stripe`
///
/// # Returns
/// - `200 OK` - Event stored
/// - `400 Bad Request` - Payload could not be parsed
/// - `401 Unauthorized` - Signature missing or invalid, or provider not configured
/// - `404 Not Found` - Unknown provider
#[utoipa::path(
    post,
    path = "/api/webhooks/{provider}",
    tag = PAYMENT_TAG,
    params(("provider" = String, Path, description = "Payment provider")),
    request_body(content = String, content_type = "application/json", description = "Raw provider payload"),
    responses(
        (status = 200, description = "Event stored", body = WebhookAckDto),
        (status = 400, description = "Malformed payload", body = ErrorDto),
        (status = 401, description = "Invalid signature", body = ErrorDto),
        (status = 404, description = "Unknown provider", body = ErrorDto)
    ),
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let provider: PaymentProvider = provider
        .parse()
        .map_err(|_| AppError::NotFound(format!("Unknown payment provider '{}'", provider)))?;

    let transaction = PaymentService::new(&state.db, &state.webhooks)
        .receive(provider, &headers, &body, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(WebhookAckDto {
            received: true,
            reference: transaction.reference,
        }),
    ))
}

/// List stored payment transactions, most recently updated first.
///
/// # Access Control
/// - `payments.view`
#[utoipa::path(
    get,
    path = "/api/admin/payments",
    tag = PAYMENT_TAG,
    params(PaginationParams, PaymentFilterParams),
    responses(
        (status = 200, description = "Page of transactions", body = PageDto<PaymentTransactionDto>),
        (status = 403, description = "Missing permission", body = ErrorDto)
    ),
)]
pub async fn get_payments(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<PaymentFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.permission_cache, &session)
        .require(&[Permission::PaymentsView])
        .await?;

    let payments = PaymentService::new(&state.db, &state.webhooks)
        .get_paginated(
            PaymentFilter {
                provider: filter.provider,
                status: filter.status,
            },
            pagination.page,
            pagination.entries(),
        )
        .await?;

    Ok((StatusCode::OK, Json(payments.into_dto(PaymentTransaction::into_dto))))
}
