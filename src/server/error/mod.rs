//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod auth;
pub mod config;
pub mod internal;
pub mod otp;
pub mod provider;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, internal::InternalError, otp::OtpError,
        provider::ProviderError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain-specific errors like `AuthError` and
/// `OtpError` handle their own response mapping, while generic variants provide standard
/// HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 401 / 403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// One-time password verification error with its own status mapping.
    #[error(transparent)]
    OtpErr(#[from] OtpError),

    /// External provider (SMS, email, OCR, identity) failure.
    ///
    /// Results in 502 Bad Gateway when it reaches a handler. Most provider failures are
    /// logged and swallowed before that point.
    #[error(transparent)]
    ProviderErr(#[from] ProviderError),

    /// Unexpected state inside the application, such as an unknown status string in the
    /// database. Logged, with a generic message returned to the client.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error while storing or removing uploaded documents.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed multipart body.
    ///
    /// Results in 400 Bad Request.
    #[error(transparent)]
    MultipartErr(#[from] axum::extract::multipart::MultipartError),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// The request conflicts with current state (duplicate email, wrong workflow state).
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// A field failed validation.
    ///
    /// Results in 422 Unprocessable Entity with the provided error message.
    #[error("{0}")]
    Validation(String),
}

/// Converts application errors into HTTP responses.
///
/// Maps each error variant to an appropriate HTTP status code and response body.
/// Authentication and OTP errors delegate to their own response handling. Internal
/// errors are logged with full details but return generic messages to avoid
/// information leakage.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` and `MultipartErr`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict`
/// - 422 Unprocessable Entity - For `Validation`
/// - 502 Bad Gateway - For `ProviderErr`
/// - 500 Internal Server Error - For all other error types (DbErr, SessionErr, etc.)
/// - Variable - For `AuthErr` and `OtpErr`
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::OtpErr(err) => err.into_response(),
            Self::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => error_response(StatusCode::CONFLICT, msg),
            Self::Validation(msg) => error_response(StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::MultipartErr(err) => error_response(StatusCode::BAD_REQUEST, err.body_text()),
            Self::ProviderErr(err) => {
                tracing::warn!("Provider error: {}", err);
                error_response(
                    StatusCode::BAD_GATEWAY,
                    "An external provider is unavailable".to_string(),
                )
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON `{"error": ...}` response with the given status.
pub fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorDto { error })).into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    }
}
