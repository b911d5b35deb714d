use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// A single page of results.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Number of rows touched by a bulk operation.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct AffectedDto {
    pub affected: u64,
}
