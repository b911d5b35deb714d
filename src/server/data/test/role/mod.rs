use crate::server::{
    data::{permission::PermissionRepository, role::RoleRepository},
    model::role::RoleParams,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_permission_keys;
