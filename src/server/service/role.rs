//! Role management with level ordering and permission cache invalidation.
//!
//! An admin may only create, edit or delete roles whose level is strictly below their own
//! highest role level. Super Admins bypass the ordering but the Super Admin role itself is
//! never editable.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{permission::PermissionRepository, role::RoleRepository},
    error::{auth::AuthError, AppError},
    middleware::auth::AdminAccess,
    model::role::{Permission, Role, RoleDetail, RoleParams, SUPER_ADMIN_ROLE},
    service::permission_cache::PermissionCache,
    util::parse::{optional_text, required_text},
};

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a PermissionCache,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a PermissionCache) -> Self {
        Self { db, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<RoleDetail>, AppError> {
        Ok(RoleRepository::new(self.db).get_all().await?)
    }

    pub async fn get(&self, id: i32) -> Result<RoleDetail, AppError> {
        RoleRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role {} not found", id)))
    }

    pub async fn get_permissions(&self) -> Result<Vec<Permission>, AppError> {
        Ok(PermissionRepository::new(self.db).get_all().await?)
    }

    /// Creates a role below the actor's level.
    ///
    /// # Returns
    /// - `Ok(RoleDetail)` - The created role
    /// - `Err(AuthError::InsufficientLevel)` - Level not below the actor's
    /// - `Err(AppError::Conflict)` - Name already used
    /// - `Err(AppError::Validation)` - Unknown permission keys or blank name
    pub async fn create(
        &self,
        actor: &AdminAccess,
        params: RoleParams,
    ) -> Result<RoleDetail, AppError> {
        let params = self.validate(params).await?;
        actor.permissions.ensure_outranks(actor.id(), params.level)?;

        let repo = RoleRepository::new(self.db);
        if repo.name_taken(&params.name, None).await? {
            return Err(AppError::Conflict(format!(
                "Role {} already exists",
                params.name
            )));
        }

        let txn = self.db.begin().await?;
        let role = RoleRepository::new(&txn).create(params).await?;
        txn.commit().await?;

        tracing::info!("Admin {} created role {}", actor.id(), role.id);

        self.get(role.id).await
    }

    /// Updates a role and its permission set, then drops every cached permission set.
    ///
    /// # Returns
    /// - `Ok(RoleDetail)` - The updated role
    /// - `Err(AppError::NotFound)` - No such role
    /// - `Err(AuthError::ProtectedRole)` - Target is the Super Admin role
    /// - `Err(AuthError::InsufficientLevel)` - Current or new level not below the actor's
    /// - `Err(AppError::Conflict)` - Name already used by another role
    /// - `Err(AppError::Validation)` - Unknown permission keys or blank name
    pub async fn update(
        &self,
        actor: &AdminAccess,
        id: i32,
        params: RoleParams,
    ) -> Result<RoleDetail, AppError> {
        let role = self.find_manageable(actor, id).await?;

        let params = self.validate(params).await?;
        actor.permissions.ensure_outranks(actor.id(), params.level)?;

        let repo = RoleRepository::new(self.db);
        if repo.name_taken(&params.name, Some(role.id)).await? {
            return Err(AppError::Conflict(format!(
                "Role {} already exists",
                params.name
            )));
        }

        let txn = self.db.begin().await?;
        RoleRepository::new(&txn).update(role.id, params).await?;
        txn.commit().await?;

        self.cache.invalidate_all().await;
        tracing::info!("Admin {} updated role {}", actor.id(), role.id);

        self.get(role.id).await
    }

    /// Deletes an unassigned role below the actor's level.
    ///
    /// # Returns
    /// - `Ok(())` - Role deleted
    /// - `Err(AppError::Conflict)` - Role is still assigned to admins
    pub async fn delete(&self, actor: &AdminAccess, id: i32) -> Result<(), AppError> {
        let role = self.find_manageable(actor, id).await?;

        let repo = RoleRepository::new(self.db);
        let admin_count = repo.admin_count(role.id).await?;
        if admin_count > 0 {
            return Err(AppError::Conflict(format!(
                "Role {} is assigned to {} admin(s)",
                role.name, admin_count
            )));
        }

        repo.delete(role.id).await?;
        self.cache.invalidate_all().await;
        tracing::info!("Admin {} deleted role {}", actor.id(), role.id);

        Ok(())
    }

    /// Loads a role the actor may edit or delete.
    async fn find_manageable(&self, actor: &AdminAccess, id: i32) -> Result<Role, AppError> {
        let role = RoleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role {} not found", id)))?;

        if role.is_super_admin() {
            return Err(AuthError::ProtectedRole.into());
        }
        actor.permissions.ensure_outranks(actor.id(), role.level)?;

        Ok(role)
    }

    async fn validate(&self, params: RoleParams) -> Result<RoleParams, AppError> {
        let name = required_text("name", params.name)?;
        if name == SUPER_ADMIN_ROLE {
            return Err(AppError::Conflict(format!("Role {} already exists", name)));
        }
        if params.level < 0 {
            return Err(AppError::Validation("level must not be negative".to_string()));
        }

        let mut permissions = params.permissions;
        permissions.sort();
        permissions.dedup();

        let unknown = PermissionRepository::new(self.db)
            .find_unknown_keys(&permissions)
            .await?;
        if !unknown.is_empty() {
            return Err(AppError::Validation(format!(
                "Unknown permission(s): {}",
                unknown.join(", ")
            )));
        }

        Ok(RoleParams {
            name,
            description: optional_text(params.description),
            level: params.level,
            is_active: params.is_active,
            permissions,
        })
    }
}
