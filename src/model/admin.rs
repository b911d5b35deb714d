use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

/// First Super Admin bootstrap using the code printed at startup.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct SetupDto {
    pub code: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct RoleSummaryDto {
    pub id: i32,
    pub name: String,
    pub level: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct AdminUserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub roles: Vec<RoleSummaryDto>,
    pub created_at: DateTime<Utc>,
}

/// The logged in admin together with the permissions resolved for them.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CurrentAdminDto {
    pub admin: AdminUserDto,
    pub permissions: Vec<String>,
    pub is_super_admin: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateAdminUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role_ids: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UpdateAdminUserDto {
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub role_ids: Vec<i32>,
}
