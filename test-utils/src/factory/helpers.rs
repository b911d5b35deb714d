//! Shared helper utilities for factory methods.
//!
//! Provides unique ID generation for all factories and convenience methods for creating
//! entities together with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Used by every factory to build unique emails, phone numbers, names and keys.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an active company and an open request belonging to it.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((company, request))` - Created company and request
/// - `Err(DbErr)` - Database error during creation
pub async fn create_request_with_company(
    db: &DatabaseConnection,
) -> Result<(entity::company::Model, entity::company_request::Model), DbErr> {
    let company = crate::factory::company::create_company(db).await?;
    let request = crate::factory::company_request::create_request(db, company.id).await?;

    Ok((company, request))
}

/// Creates an active admin holding a new role with the given level and permissions.
///
/// Permission rows for `permission_keys` are created if they do not exist yet.
///
/// # Arguments
/// - `db` - Database connection
/// - `role_name` - Name of the role to create
/// - `level` - Role level
/// - `permission_keys` - Permission keys granted to the role
///
/// # Returns
/// - `Ok((admin, role))` - Created admin and role
/// - `Err(DbErr)` - Database error during creation
pub async fn create_admin_with_role(
    db: &DatabaseConnection,
    role_name: &str,
    level: i32,
    permission_keys: &[&str],
) -> Result<(entity::admin_user::Model, entity::role::Model), DbErr> {
    let admin = crate::factory::admin_user::create_admin(db).await?;
    let role = crate::factory::role::RoleFactory::new(db)
        .name(role_name)
        .level(level)
        .build()
        .await?;
    crate::factory::role::grant_permissions(db, role.id, permission_keys).await?;
    crate::factory::role::assign_role(db, admin.id, role.id).await?;

    Ok((admin, role))
}
