use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether an external provider is configured. Never carries credentials.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct IntegrationStatusDto {
    pub kind: String,
    pub provider: String,
    pub configured: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct IntegrationsDto {
    pub integrations: Vec<IntegrationStatusDto>,
}
