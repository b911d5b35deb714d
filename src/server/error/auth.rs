use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No admin or driver id in the session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Session references an account that no longer exists.
    #[error("Account {0} referenced by session does not exist")]
    UnknownAccount(i32),

    /// Email/phone and password combination did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account exists but is deactivated or suspended.
    #[error("Account {0} is not active")]
    AccountInactive(i32),

    /// Driver tried to log in before verifying their phone number.
    #[error("Driver {0} has not verified their phone number")]
    PhoneNotVerified(i32),

    /// Authenticated admin lacks a required permission.
    ///
    /// # Fields
    /// - Admin id
    /// - Message describing the missing permission, logged only
    #[error("Admin {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Password re-entry for a sensitive action failed.
    #[error("Password confirmation failed for admin {0}")]
    PasswordConfirmationFailed(i32),

    /// Actor's highest role level does not exceed the target level.
    #[error("Admin {admin_id} (level {actor_level}) cannot manage level {target_level}")]
    InsufficientLevel {
        admin_id: i32,
        actor_level: i32,
        target_level: i32,
    },

    /// Change would leave the system without an active Super Admin.
    #[error("The last active Super Admin cannot be removed")]
    LastSuperAdmin,

    /// The Super Admin role itself cannot be changed.
    #[error("The Super Admin role cannot be modified")]
    ProtectedRole,

    /// Setup code missing, expired, or already consumed.
    #[error("Invalid or expired setup code")]
    InvalidSetupCode,

    /// Webhook signature header missing or wrong, or no secret configured.
    #[error("Invalid webhook signature for {0}")]
    InvalidSignature(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `NotLoggedIn`, `UnknownAccount`, `InvalidCredentials`, `AccountInactive`,
///   `PhoneNotVerified`, `InvalidSetupCode`, `InvalidSignature` → 401 Unauthorized
/// - `AccessDenied`, `PasswordConfirmationFailed`, `InsufficientLevel`, `LastSuperAdmin`,
///   `ProtectedRole` → 403 Forbidden
///
/// Details that identify accounts are logged at debug level only.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotLoggedIn | Self::UnknownAccount(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Not logged in".to_string())
            }
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            Self::AccountInactive(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Account is not active".to_string())
            }
            Self::PhoneNotVerified(_) => error_response(
                StatusCode::UNAUTHORIZED,
                "Phone number has not been verified".to_string(),
            ),
            Self::InvalidSetupCode => error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired setup code".to_string(),
            ),
            Self::InvalidSignature(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid signature".to_string())
            }
            Self::AccessDenied(_, _) => {
                error_response(StatusCode::FORBIDDEN, "Access denied".to_string())
            }
            Self::PasswordConfirmationFailed(_) => {
                error_response(StatusCode::FORBIDDEN, "Password is incorrect".to_string())
            }
            Self::InsufficientLevel { .. } => error_response(
                StatusCode::FORBIDDEN,
                "You cannot manage roles at or above your own level".to_string(),
            ),
            Self::LastSuperAdmin => error_response(
                StatusCode::FORBIDDEN,
                "The last active Super Admin cannot be removed".to_string(),
            ),
            Self::ProtectedRole => error_response(
                StatusCode::FORBIDDEN,
                "The Super Admin role cannot be modified".to_string(),
            ),
        }
    }
}
