//! Authentication guards for admin and driver endpoints.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::status::DriverStatus,
    server::{
        data::{admin_user::AdminUserRepository, driver::DriverRepository},
        error::{auth::AuthError, AppError},
        middleware::session::{AdminSession, DriverSession},
        model::{admin::AdminUser, driver::Driver},
        service::permission_cache::{EffectivePermissions, PermissionCache},
    },
};

/// Permission keys checked by admin endpoints.
///
/// The keys match the rows seeded into the `permission` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    DashboardView,
    DriversView,
    DriversManage,
    DriversVerify,
    CompaniesView,
    CompaniesManage,
    RequestsView,
    RequestsManage,
    MatchesView,
    MatchesManage,
    RolesManage,
    AdminsManage,
    NotificationsManage,
    IntegrationsView,
    PaymentsView,
    ReportsExport,
}

impl Permission {
    pub const ALL: [Permission; 16] = [
        Permission::DashboardView,
        Permission::DriversView,
        Permission::DriversManage,
        Permission::DriversVerify,
        Permission::CompaniesView,
        Permission::CompaniesManage,
        Permission::RequestsView,
        Permission::RequestsManage,
        Permission::MatchesView,
        Permission::MatchesManage,
        Permission::RolesManage,
        Permission::AdminsManage,
        Permission::NotificationsManage,
        Permission::IntegrationsView,
        Permission::PaymentsView,
        Permission::ReportsExport,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Permission::DashboardView => "dashboard.view",
            Permission::DriversView => "drivers.view",
            Permission::DriversManage => "drivers.manage",
            Permission::DriversVerify => "drivers.verify",
            Permission::CompaniesView => "companies.view",
            Permission::CompaniesManage => "companies.manage",
            Permission::RequestsView => "requests.view",
            Permission::RequestsManage => "requests.manage",
            Permission::MatchesView => "matches.view",
            Permission::MatchesManage => "matches.manage",
            Permission::RolesManage => "roles.manage",
            Permission::AdminsManage => "admins.manage",
            Permission::NotificationsManage => "notifications.manage",
            Permission::IntegrationsView => "integrations.view",
            Permission::PaymentsView => "payments.view",
            Permission::ReportsExport => "reports.export",
        }
    }
}

/// The authenticated admin together with their effective permissions.
#[derive(Debug, Clone)]
pub struct AdminAccess {
    pub admin: AdminUser,
    pub permissions: Arc<EffectivePermissions>,
}

impl AdminAccess {
    pub fn id(&self) -> i32 {
        self.admin.id
    }
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    cache: &'a PermissionCache,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a PermissionCache, session: &'a Session) -> Self {
        Self { db, cache, session }
    }

    /// Requires a logged-in, active admin holding every permission in `permissions`.
    ///
    /// An empty slice only checks authentication.
    ///
    /// # Returns
    /// - `Ok(AdminAccess)` - Admin and effective permissions
    /// - `Err(AuthError::NotLoggedIn)` - No admin in session
    /// - `Err(AuthError::UnknownAccount)` - Session references a deleted admin
    /// - `Err(AuthError::AccountInactive)` - Admin has been deactivated
    /// - `Err(AuthError::AccessDenied)` - A required permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<AdminAccess, AppError> {
        let Some(admin_id) = AdminSession::new(self.session).get_admin_id().await? else {
            return Err(AuthError::NotLoggedIn.into());
        };

        let Some(admin) = AdminUserRepository::new(self.db).find_by_id(admin_id).await? else {
            return Err(AuthError::UnknownAccount(admin_id).into());
        };

        if !admin.is_active {
            return Err(AuthError::AccountInactive(admin_id).into());
        }

        let effective = self.cache.get_or_load(self.db, admin_id).await?;

        for permission in permissions {
            if !effective.has(permission.key()) {
                return Err(AuthError::AccessDenied(
                    admin_id,
                    format!("missing permission {}", permission.key()),
                )
                .into());
            }
        }

        Ok(AdminAccess {
            admin,
            permissions: effective,
        })
    }
}

pub struct DriverGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> DriverGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Requires a logged-in driver whose account is not suspended.
    pub async fn require(&self) -> Result<Driver, AppError> {
        let Some(driver_id) = DriverSession::new(self.session).get_driver_id().await? else {
            return Err(AuthError::NotLoggedIn.into());
        };

        let Some(driver) = DriverRepository::new(self.db).find_by_id(driver_id).await? else {
            return Err(AuthError::UnknownAccount(driver_id).into());
        };

        if driver.status == DriverStatus::Suspended {
            return Err(AuthError::AccountInactive(driver_id).into());
        }

        Ok(driver)
    }
}
