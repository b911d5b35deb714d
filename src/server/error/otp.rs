use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    /// Code did not match.
    #[error("Invalid code, {remaining} attempt(s) remaining")]
    InvalidCode { remaining: i32 },

    /// Code has passed its expiry.
    #[error("Code has expired, request a new one")]
    Expired,

    /// Too many wrong codes were entered; the code is locked.
    #[error("Too many incorrect attempts, request a new code")]
    TooManyAttempts,

    /// A new code was requested too soon after the previous one.
    #[error("Please wait {retry_after} second(s) before requesting another code")]
    ResendCooldown { retry_after: i64 },

    /// No unverified code exists for the identifier and purpose.
    #[error("No pending verification code")]
    NoPendingCode,
}

/// Maps OTP failures onto 400 / 404 / 410 / 429.
impl IntoResponse for OtpError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidCode { .. } => StatusCode::BAD_REQUEST,
            Self::Expired => StatusCode::GONE,
            Self::TooManyAttempts | Self::ResendCooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::NoPendingCode => StatusCode::NOT_FOUND,
        };

        error_response(status, self.to_string())
    }
}
