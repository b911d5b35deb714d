//! Role data repository.
//!
//! Roles own their permission assignments in `role_permission`. Permission keys are
//! resolved against the `permission` table; callers validate unknown keys beforehand.

use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::role::{Role, RoleDetail, RoleParams};

pub struct RoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets every role, highest level first, with permission keys and admin counts.
    pub async fn get_all(&self) -> Result<Vec<RoleDetail>, DbErr> {
        let roles = entity::prelude::Role::find()
            .order_by_desc(entity::role::Column::Level)
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await?;

        let mut details = Vec::with_capacity(roles.len());
        for role in roles {
            details.push(self.detail(Role::from_entity(role)).await?);
        }

        Ok(details)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<RoleDetail>, DbErr> {
        match self.find_by_id(id).await? {
            Some(role) => Ok(Some(self.detail(role).await?)),
            None => Ok(None),
        }
    }

    async fn detail(&self, role: Role) -> Result<RoleDetail, DbErr> {
        let permissions = self.get_permission_keys(&[role.id]).await?;
        let admin_count = self.admin_count(role.id).await?;

        Ok(RoleDetail {
            role,
            permissions,
            admin_count,
        })
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Role>, DbErr> {
        let role = entity::prelude::Role::find_by_id(id).one(self.db).await?;

        Ok(role.map(Role::from_entity))
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Role>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let roles = entity::prelude::Role::find()
            .filter(entity::role::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(roles.into_iter().map(Role::from_entity).collect())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DbErr> {
        let role = entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .one(self.db)
            .await?;

        Ok(role.map(Role::from_entity))
    }

    /// Checks whether another role already uses `name`.
    pub async fn name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Role::find().filter(entity::role::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(entity::role::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Inserts a role and grants its permission keys.
    ///
    /// # Returns
    /// - `Ok(Role)` - The created role
    /// - `Err(DbErr)` - Insert failed (e.g. duplicate name)
    pub async fn create(&self, params: RoleParams) -> Result<Role, DbErr> {
        let now = Utc::now();
        let role = entity::role::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            level: ActiveValue::Set(params.level),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.set_permissions(role.id, &params.permissions).await?;

        Ok(Role::from_entity(role))
    }

    /// Updates a role's fields and replaces its permission set.
    ///
    /// # Returns
    /// - `Ok(Some(Role))` - The updated role
    /// - `Ok(None)` - No role with that id
    pub async fn update(&self, id: i32, params: RoleParams) -> Result<Option<Role>, DbErr> {
        let Some(role) = entity::prelude::Role::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::role::ActiveModel = role.into();
        active.name = ActiveValue::Set(params.name);
        active.description = ActiveValue::Set(params.description);
        active.level = ActiveValue::Set(params.level);
        active.is_active = ActiveValue::Set(params.is_active);
        active.updated_at = ActiveValue::Set(Utc::now());
        let role = active.update(self.db).await?;

        self.set_permissions(role.id, &params.permissions).await?;

        Ok(Some(Role::from_entity(role)))
    }

    /// Replaces the permission set of a role. Keys with no permission row are skipped.
    pub async fn set_permissions(&self, role_id: i32, keys: &[String]) -> Result<(), DbErr> {
        entity::prelude::RolePermission::delete_many()
            .filter(entity::role_permission::Column::RoleId.eq(role_id))
            .exec(self.db)
            .await?;

        if keys.is_empty() {
            return Ok(());
        }

        let permissions = entity::prelude::Permission::find()
            .filter(entity::permission::Column::Key.is_in(keys.to_vec()))
            .all(self.db)
            .await?;

        for permission in permissions {
            entity::role_permission::ActiveModel {
                role_id: ActiveValue::Set(role_id),
                permission_id: ActiveValue::Set(permission.id),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Role::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts admins assigned to a role.
    pub async fn admin_count(&self, role_id: i32) -> Result<u64, DbErr> {
        entity::prelude::AdminUserRole::find()
            .filter(entity::admin_user_role::Column::RoleId.eq(role_id))
            .count(self.db)
            .await
    }

    /// Gets the sorted, de-duplicated permission keys granted by any of `role_ids`.
    pub async fn get_permission_keys(&self, role_ids: &[i32]) -> Result<Vec<String>, DbErr> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let permissions = entity::prelude::Permission::find()
            .inner_join(entity::prelude::RolePermission)
            .filter(entity::role_permission::Column::RoleId.is_in(role_ids.to_vec()))
            .all(self.db)
            .await?;

        let keys: BTreeSet<String> = permissions.into_iter().map(|p| p.key).collect();

        Ok(keys.into_iter().collect())
    }

    /// Gets the active roles assigned to an admin.
    pub async fn get_active_roles_for_admin(&self, admin_id: i32) -> Result<Vec<Role>, DbErr> {
        let roles = entity::prelude::Role::find()
            .inner_join(entity::prelude::AdminUserRole)
            .filter(entity::admin_user_role::Column::AdminUserId.eq(admin_id))
            .filter(entity::role::Column::IsActive.eq(true))
            .order_by_desc(entity::role::Column::Level)
            .all(self.db)
            .await?;

        Ok(roles.into_iter().map(Role::from_entity).collect())
    }
}
