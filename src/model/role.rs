use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub level: i32,
    pub is_active: bool,
    pub permissions: Vec<String>,
    pub admin_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateRoleDto {
    pub name: String,
    pub description: Option<String>,
    pub level: i32,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UpdateRoleDto {
    pub name: String,
    pub description: Option<String>,
    pub level: i32,
    pub is_active: bool,
    pub permissions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PermissionDto {
    pub key: String,
    pub description: String,
}
