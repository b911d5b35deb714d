//! Role and permission domain models.
//!
//! Roles group permission keys and carry a numeric level. The level only matters when one
//! admin manages roles or other admins: the target must sit strictly below the actor.

use crate::model::{
    admin::RoleSummaryDto,
    role::{PermissionDto, RoleDto},
};

/// Name of the built-in role that implicitly holds every permission.
pub const SUPER_ADMIN_ROLE: &str = "Super Admin";

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub level: i32,
    pub is_active: bool,
}

impl Role {
    pub fn from_entity(entity: entity::role::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            level: entity.level,
            is_active: entity.is_active,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.name == SUPER_ADMIN_ROLE
    }

    pub fn into_summary_dto(self) -> RoleSummaryDto {
        RoleSummaryDto {
            id: self.id,
            name: self.name,
            level: self.level,
        }
    }
}

/// Role with its granted permission keys and the number of admins holding it.
#[derive(Debug, Clone)]
pub struct RoleDetail {
    pub role: Role,
    pub permissions: Vec<String>,
    pub admin_count: u64,
}

impl RoleDetail {
    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.role.id,
            name: self.role.name,
            description: self.role.description,
            level: self.role.level,
            is_active: self.role.is_active,
            permissions: self.permissions,
            admin_count: self.admin_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Permission {
    pub id: i32,
    pub key: String,
    pub description: String,
}

impl Permission {
    pub fn from_entity(entity: entity::permission::Model) -> Self {
        Self {
            id: entity.id,
            key: entity.key,
            description: entity.description,
        }
    }

    pub fn into_dto(self) -> PermissionDto {
        PermissionDto {
            key: self.key,
            description: self.description,
        }
    }
}

/// Values written when creating or updating a role.
#[derive(Debug, Clone)]
pub struct RoleParams {
    pub name: String,
    pub description: Option<String>,
    pub level: i32,
    pub is_active: bool,
    pub permissions: Vec<String>,
}
