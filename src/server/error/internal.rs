use thiserror::Error;

use crate::model::status::ParseStatusError;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A status or kind column holds a value no enum variant matches.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse stored value: {0}")]
    UnknownStoredValue(#[from] ParseStatusError),

    /// Password hashing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// A row that was just written could not be read back.
    #[error("{entity} {id} missing after write")]
    MissingAfterWrite { entity: &'static str, id: i32 },
}
