//! Back-office admin management.
//!
//! Guards the invariant that at least one active admin always holds the Super Admin role,
//! and the level ordering for role assignment: an admin may only grant or revoke roles
//! strictly below their own highest level unless they are a Super Admin.

use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::BTreeSet;

use crate::server::{
    data::{admin_user::AdminUserRepository, role::RoleRepository},
    error::{auth::AuthError, AppError},
    middleware::auth::AdminAccess,
    model::{
        admin::{AdminWithRoles, CreateAdminUserParams, UpdateAdminUserParams},
        page::Paginated,
        role::Role,
    },
    service::permission_cache::PermissionCache,
    util::{
        parse::{self, optional_text},
        password::{hash_password, validate_password},
    },
};

/// Values submitted to create an admin. The password is plain text here.
#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_ids: Vec<i32>,
}

pub struct AdminUserService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a PermissionCache,
}

impl<'a> AdminUserService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a PermissionCache) -> Self {
        Self { db, cache }
    }

    pub async fn get_paginated(
        &self,
        search: Option<String>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<AdminWithRoles>, AppError> {
        let search = optional_text(search);

        Ok(AdminUserRepository::new(self.db)
            .get_paginated(search.as_deref(), page, per_page)
            .await?)
    }

    pub async fn get(&self, id: i32) -> Result<AdminWithRoles, AppError> {
        AdminUserRepository::new(self.db)
            .get_with_roles(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Admin {} not found", id)))
    }

    /// Creates an admin with the given roles.
    ///
    /// # Returns
    /// - `Ok(AdminWithRoles)` - The created admin
    /// - `Err(AppError::Conflict)` - Email already in use
    /// - `Err(AppError::Validation)` - Invalid input or unknown role id
    /// - `Err(AuthError::InsufficientLevel)` - A role is not below the actor's level
    pub async fn create(
        &self,
        actor: &AdminAccess,
        params: NewAdminUser,
    ) -> Result<AdminWithRoles, AppError> {
        let name = parse::required_text("name", params.name)?;
        let email = parse::email(params.email)?;
        validate_password(&params.password)?;

        let repo = AdminUserRepository::new(self.db);
        if repo.email_taken(&email, None).await? {
            return Err(AppError::Conflict(format!("{} is already in use", email)));
        }

        let roles = self.load_roles(&params.role_ids).await?;
        for role in &roles {
            actor.permissions.ensure_outranks(actor.id(), role.level)?;
        }

        let admin = repo
            .create(CreateAdminUserParams {
                name,
                email,
                password_hash: hash_password(&params.password)?,
                role_ids: roles.iter().map(|r| r.id).collect(),
            })
            .await?;
        tracing::info!("Admin {} created admin {}", actor.id(), admin.id);

        self.get(admin.id).await
    }

    /// Updates profile, active flag and role assignments.
    ///
    /// Only roles that are added or removed are checked against the actor's level.
    ///
    /// # Returns
    /// - `Ok(AdminWithRoles)` - The updated admin
    /// - `Err(AppError::NotFound)` - No such admin
    /// - `Err(AuthError::LastSuperAdmin)` - Change would leave no active Super Admin
    /// - `Err(AuthError::InsufficientLevel)` - A changed role is not below the actor's level
    pub async fn update(
        &self,
        actor: &AdminAccess,
        params: UpdateAdminUserParams,
    ) -> Result<AdminWithRoles, AppError> {
        let current = self.get(params.id).await?;

        let name = parse::required_text("name", params.name)?;
        let email = parse::email(params.email)?;

        let repo = AdminUserRepository::new(self.db);
        if repo.email_taken(&email, Some(current.admin.id)).await? {
            return Err(AppError::Conflict(format!("{} is already in use", email)));
        }

        let new_roles = self.load_roles(&params.role_ids).await?;
        let current_ids: BTreeSet<i32> = current.roles.iter().map(|r| r.id).collect();
        let new_ids: BTreeSet<i32> = new_roles.iter().map(|r| r.id).collect();

        let changed = new_roles
            .iter()
            .filter(|r| !current_ids.contains(&r.id))
            .chain(current.roles.iter().filter(|r| !new_ids.contains(&r.id)));
        for role in changed {
            actor.permissions.ensure_outranks(actor.id(), role.level)?;
        }

        let keeps_super_admin =
            params.is_active && new_roles.iter().any(|r| r.is_super_admin() && r.is_active);
        if is_active_super_admin(&current) && !keeps_super_admin {
            self.ensure_not_last_super_admin().await?;
        }

        let txn = self.db.begin().await?;
        AdminUserRepository::new(&txn)
            .update(UpdateAdminUserParams {
                id: current.admin.id,
                name,
                email,
                is_active: params.is_active,
                role_ids: new_ids.into_iter().collect(),
            })
            .await?;
        txn.commit().await?;

        self.cache.invalidate_admin(current.admin.id).await;
        tracing::info!("Admin {} updated admin {}", actor.id(), current.admin.id);

        self.get(current.admin.id).await
    }

    /// Deletes another admin.
    ///
    /// # Returns
    /// - `Ok(())` - Admin deleted
    /// - `Err(AppError::BadRequest)` - Actor tried to delete themself
    /// - `Err(AppError::NotFound)` - No such admin
    /// - `Err(AuthError::LastSuperAdmin)` - Target is the last active Super Admin
    /// - `Err(AuthError::InsufficientLevel)` - Target holds a role not below the actor's level
    pub async fn delete(&self, actor: &AdminAccess, id: i32) -> Result<(), AppError> {
        if id == actor.id() {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let target = self.get(id).await?;

        if is_active_super_admin(&target) {
            self.ensure_not_last_super_admin().await?;
        }
        for role in &target.roles {
            actor.permissions.ensure_outranks(actor.id(), role.level)?;
        }

        AdminUserRepository::new(self.db).delete(id).await?;
        self.cache.invalidate_admin(id).await;
        tracing::info!("Admin {} deleted admin {}", actor.id(), id);

        Ok(())
    }

    async fn load_roles(&self, role_ids: &[i32]) -> Result<Vec<Role>, AppError> {
        let requested: BTreeSet<i32> = role_ids.iter().copied().collect();
        let roles = RoleRepository::new(self.db)
            .find_by_ids(&requested.iter().copied().collect::<Vec<_>>())
            .await?;

        if let Some(missing) = requested
            .iter()
            .find(|id| !roles.iter().any(|r| r.id == **id))
        {
            return Err(AppError::Validation(format!("Unknown role id {}", missing)));
        }

        Ok(roles)
    }

    async fn ensure_not_last_super_admin(&self) -> Result<(), AppError> {
        let count = AdminUserRepository::new(self.db)
            .count_active_super_admins()
            .await?;
        if count <= 1 {
            return Err(AuthError::LastSuperAdmin.into());
        }

        Ok(())
    }
}

/// Whether an admin currently counts towards the active Super Admin total.
fn is_active_super_admin(admin: &AdminWithRoles) -> bool {
    admin.admin.is_active && admin.roles.iter().any(|r| r.is_super_admin() && r.is_active)
}
