use std::str::FromStr;

use crate::{
    model::status::ParseStatusError,
    server::error::{internal::InternalError, AppError},
};

/// Parses a status or kind column read from the database.
///
/// # Arguments
/// - `value` - The stored string
///
/// # Returns
/// - `Ok(T)` - Successfully parsed variant
/// - `Err(AppError::InternalErr(UnknownStoredValue))` - The string names no variant
pub fn parse_stored<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = ParseStatusError>,
{
    let result = value
        .parse::<T>()
        .map_err(InternalError::UnknownStoredValue)?;

    Ok(result)
}

/// Trims a required text field, rejecting blank input.
///
/// # Returns
/// - `Ok(String)` - Trimmed value
/// - `Err(AppError::Validation)` - Value is empty after trimming
pub fn required_text(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }

    Ok(trimmed.to_string())
}

/// Trims an optional text field, mapping blank input to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalizes and minimally validates an email address.
pub fn email(value: String) -> Result<String, AppError> {
    let email = required_text("email", value)?.to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::Validation("email is not valid".to_string())),
    }
}

/// Strips spaces and dashes from a phone number and checks it is mostly digits.
pub fn phone(value: String) -> Result<String, AppError> {
    let phone: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let digits = phone.strip_prefix('+').unwrap_or(&phone);

    if digits.len() < 7 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation("phone is not valid".to_string()));
    }

    Ok(phone)
}
