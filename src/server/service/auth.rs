//! Admin authentication: login, password changes and first Super Admin setup.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{admin_user::AdminUserRepository, role::RoleRepository},
    error::{auth::AuthError, AppError},
    model::{
        admin::{AdminUser, AdminWithRoles, CreateAdminUserParams},
        role::{RoleParams, SUPER_ADMIN_ROLE},
    },
    service::{
        permission_cache::{EffectivePermissions, PermissionCache},
        setup_code::SetupCodeService,
    },
    util::{
        parse,
        password::{hash_password, validate_password, verify_password},
    },
};

/// Level given to the Super Admin role when setup has to create it.
const SUPER_ADMIN_LEVEL: i32 = 100;

/// Values submitted to create the first Super Admin.
#[derive(Debug, Clone)]
pub struct SetupParams {
    pub code: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a PermissionCache,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a PermissionCache) -> Self {
        Self { db, cache }
    }

    /// Checks email and password and records the login time.
    ///
    /// # Returns
    /// - `Ok(AdminUser)` - Credentials valid and account active
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::AccountInactive)` - Account has been deactivated
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, AppError> {
        let repo = AdminUserRepository::new(self.db);
        let email = email.trim().to_lowercase();

        let Some(admin) = repo.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &admin.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !admin.is_active {
            return Err(AuthError::AccountInactive(admin.id).into());
        }

        repo.touch_last_login(admin.id).await?;
        tracing::info!("Admin {} logged in", admin.id);

        Ok(admin)
    }

    /// Gets an admin with roles and effective permissions.
    pub async fn current(
        &self,
        admin_id: i32,
    ) -> Result<(AdminWithRoles, std::sync::Arc<EffectivePermissions>), AppError> {
        let admin = AdminUserRepository::new(self.db)
            .get_with_roles(admin_id)
            .await?
            .ok_or(AuthError::UnknownAccount(admin_id))?;
        let permissions = self.cache.get_or_load(self.db, admin_id).await?;

        Ok((admin, permissions))
    }

    /// Changes an admin's own password after re-checking the current one.
    ///
    /// # Returns
    /// - `Ok(())` - Password changed
    /// - `Err(AuthError::PasswordConfirmationFailed)` - Current password wrong
    /// - `Err(AppError::Validation)` - New password too short
    pub async fn change_password(
        &self,
        admin: &AdminUser,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if !verify_password(current_password, &admin.password_hash) {
            return Err(AuthError::PasswordConfirmationFailed(admin.id).into());
        }
        validate_password(new_password)?;

        let hash = hash_password(new_password)?;
        AdminUserRepository::new(self.db)
            .update_password(admin.id, hash)
            .await?;

        Ok(())
    }

    /// Creates the first Super Admin using the one-time setup code.
    ///
    /// Input is validated before the code is consumed, so a typo does not burn the code.
    ///
    /// # Returns
    /// - `Ok(AdminUser)` - The new Super Admin
    /// - `Err(AppError::Conflict)` - An active Super Admin already exists
    /// - `Err(AuthError::InvalidSetupCode)` - Code wrong, expired or already used
    /// - `Err(AppError::Validation)` - Name, email or password invalid
    pub async fn setup(
        &self,
        codes: &SetupCodeService,
        params: SetupParams,
    ) -> Result<AdminUser, AppError> {
        let admin_repo = AdminUserRepository::new(self.db);
        if admin_repo.super_admin_exists().await? {
            return Err(AppError::Conflict("Setup has already been completed".to_string()));
        }

        let name = parse::required_text("name", params.name)?;
        let email = parse::email(params.email)?;
        validate_password(&params.password)?;
        if admin_repo.email_taken(&email, None).await? {
            return Err(AppError::Conflict(format!("{} is already in use", email)));
        }

        if !codes.validate_and_consume(&params.code).await {
            return Err(AuthError::InvalidSetupCode.into());
        }

        let password_hash = hash_password(&params.password)?;

        let txn = self.db.begin().await?;
        let role_repo = RoleRepository::new(&txn);
        let role = match role_repo.find_by_name(SUPER_ADMIN_ROLE).await? {
            Some(role) => role,
            None => {
                role_repo
                    .create(RoleParams {
                        name: SUPER_ADMIN_ROLE.to_string(),
                        description: Some("Full access".to_string()),
                        level: SUPER_ADMIN_LEVEL,
                        is_active: true,
                        permissions: Vec::new(),
                    })
                    .await?
            }
        };

        let admin = AdminUserRepository::new(&txn)
            .create(CreateAdminUserParams {
                name,
                email,
                password_hash,
                role_ids: vec![role.id],
            })
            .await?;
        txn.commit().await?;

        self.cache.invalidate_admin(admin.id).await;
        tracing::info!("First Super Admin {} created through setup", admin.id);

        Ok(admin)
    }
}
