use crate::{
    model::status::DriverStatus,
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::{AuthGuard, DriverGuard, Permission},
            session::{AdminSession, DriverSession},
        },
        service::permission_cache::PermissionCache,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod require;
mod require_driver;
