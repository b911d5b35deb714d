//! Filesystem storage for KYC documents.

use rand::Rng;
use std::path::{Path, PathBuf};

use crate::{model::status::DocumentType, server::error::AppError};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// Returns the lowercased extension of an uploaded file name if it is whitelisted.
pub fn allowed_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();

    ALLOWED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Checks name and size of an uploaded document.
///
/// # Returns
/// - `Ok(extension)` - Lowercased, whitelisted extension
/// - `Err(AppError::Validation)` - Empty file, too large, or extension not allowed
pub fn validate_document(
    document_type: DocumentType,
    file_name: &str,
    size: usize,
) -> Result<String, AppError> {
    let Some(extension) = allowed_extension(file_name) else {
        return Err(AppError::Validation(format!(
            "{} must be one of: {}",
            document_type,
            ALLOWED_EXTENSIONS.join(", ")
        )));
    };

    if size == 0 {
        return Err(AppError::Validation(format!("{} is empty", document_type)));
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "{} exceeds the {} MiB limit",
            document_type,
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    Ok(extension)
}

/// Writes a document to `<upload_dir>/drivers/<driver_id>/<type>-<random>.<ext>`.
///
/// # Returns
/// - `Ok(PathBuf)` - Path of the written file
/// - `Err(AppError::IoErr)` - Directory creation or write failed
pub async fn store_document(
    upload_dir: &Path,
    driver_id: i32,
    document_type: DocumentType,
    extension: &str,
    bytes: &[u8],
) -> Result<PathBuf, AppError> {
    let dir = driver_dir(upload_dir, driver_id);
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(format!(
        "{}-{}.{}",
        document_type,
        random_suffix(),
        extension
    ));
    tokio::fs::write(&path, bytes).await?;

    Ok(path)
}

/// Removes every stored document of a driver. Missing directories are ignored.
pub async fn remove_driver_documents(upload_dir: &Path, driver_id: i32) -> Result<(), AppError> {
    match tokio::fs::remove_dir_all(driver_dir(upload_dir, driver_id)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn driver_dir(upload_dir: &Path, driver_id: i32) -> PathBuf {
    upload_dir.join("drivers").join(driver_id.to_string())
}

fn random_suffix() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();

    (0..16)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
