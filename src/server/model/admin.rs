//! Admin user domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::admin::{AdminUserDto, CurrentAdminDto},
    server::model::role::Role,
};

/// A back-office account. The password hash never leaves the server layer.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AdminUser {
    pub fn from_entity(entity: entity::admin_user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            password_hash: entity.password_hash,
            is_active: entity.is_active,
            last_login_at: entity.last_login_at,
            created_at: entity.created_at,
        }
    }
}

/// Admin together with every role assigned to them, active or not.
#[derive(Debug, Clone)]
pub struct AdminWithRoles {
    pub admin: AdminUser,
    pub roles: Vec<Role>,
}

impl AdminWithRoles {
    pub fn into_dto(self) -> AdminUserDto {
        AdminUserDto {
            id: self.admin.id,
            name: self.admin.name,
            email: self.admin.email,
            is_active: self.admin.is_active,
            last_login_at: self.admin.last_login_at,
            roles: self
                .roles
                .into_iter()
                .map(Role::into_summary_dto)
                .collect(),
            created_at: self.admin.created_at,
        }
    }

    pub fn into_current_dto(
        self,
        permissions: Vec<String>,
        is_super_admin: bool,
    ) -> CurrentAdminDto {
        CurrentAdminDto {
            admin: self.into_dto(),
            permissions,
            is_super_admin,
        }
    }
}

/// Parameters for creating an admin. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct CreateAdminUserParams {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_ids: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct UpdateAdminUserParams {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub role_ids: Vec<i32>,
}
