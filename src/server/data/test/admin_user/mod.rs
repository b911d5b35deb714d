use crate::server::{
    data::admin_user::AdminUserRepository,
    model::{
        admin::{CreateAdminUserParams, UpdateAdminUserParams},
        role::SUPER_ADMIN_ROLE,
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_active_super_admins;
mod create;
mod get_paginated;
mod update;
