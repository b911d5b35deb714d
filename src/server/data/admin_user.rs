//! Admin user data repository.
//!
//! Provides `AdminUserRepository` for admin accounts and their role assignments. Role
//! assignment rows live in `admin_user_role`; this repository replaces them as a set.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::server::model::{
    admin::{AdminUser, AdminWithRoles, CreateAdminUserParams, UpdateAdminUserParams},
    page::Paginated,
    role::{Role, SUPER_ADMIN_ROLE},
};

pub struct AdminUserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AdminUserRepository<'a, C> {
    /// Creates a new AdminUserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an admin and assigns the given roles.
    ///
    /// # Arguments
    /// - `params` - Name, email, password hash and role ids
    ///
    /// # Returns
    /// - `Ok(AdminUser)` - The created admin
    /// - `Err(DbErr)` - Insert failed (e.g. duplicate email)
    pub async fn create(&self, params: CreateAdminUserParams) -> Result<AdminUser, DbErr> {
        let now = Utc::now();
        let admin = entity::admin_user::ActiveModel {
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            is_active: ActiveValue::Set(true),
            last_login_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.set_roles(admin.id, &params.role_ids).await?;

        Ok(AdminUser::from_entity(admin))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<AdminUser>, DbErr> {
        let admin = entity::prelude::AdminUser::find_by_id(id).one(self.db).await?;

        Ok(admin.map(AdminUser::from_entity))
    }

    /// Finds an admin by email. Emails are stored lowercase.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, DbErr> {
        let admin = entity::prelude::AdminUser::find()
            .filter(entity::admin_user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(admin.map(AdminUser::from_entity))
    }

    /// Checks whether another admin already uses `email`.
    ///
    /// # Arguments
    /// - `email` - Email to check
    /// - `exclude_id` - Admin to ignore, used when updating that admin
    pub async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::AdminUser::find()
            .filter(entity::admin_user::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(entity::admin_user::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets an admin together with all assigned roles, highest level first.
    pub async fn get_with_roles(&self, id: i32) -> Result<Option<AdminWithRoles>, DbErr> {
        let Some(admin) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let roles = self.get_roles(id).await?;

        Ok(Some(AdminWithRoles { admin, roles }))
    }

    /// Gets every role assigned to an admin, including inactive roles.
    pub async fn get_roles(&self, admin_id: i32) -> Result<Vec<Role>, DbErr> {
        let roles = entity::prelude::Role::find()
            .inner_join(entity::prelude::AdminUserRole)
            .filter(entity::admin_user_role::Column::AdminUserId.eq(admin_id))
            .order_by_desc(entity::role::Column::Level)
            .order_by_asc(entity::role::Column::Id)
            .all(self.db)
            .await?;

        Ok(roles.into_iter().map(Role::from_entity).collect())
    }

    /// Gets a page of admins ordered by name, optionally filtered by a name/email substring.
    ///
    /// # Arguments
    /// - `search` - Optional substring matched against name and email
    /// - `page` - Zero-based page number
    /// - `per_page` - Number of admins per page
    ///
    /// # Returns
    /// - `Ok(Paginated<AdminWithRoles>)` - Admins on the page with their roles
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<AdminWithRoles>, DbErr> {
        let mut query =
            entity::prelude::AdminUser::find().order_by_asc(entity::admin_user::Column::Name);
        if let Some(search) = search {
            query = query.filter(
                Condition::any()
                    .add(entity::admin_user::Column::Name.contains(search))
                    .add(entity::admin_user::Column::Email.contains(search)),
            );
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let admins = paginator.fetch_page(page).await?;

        let admin_ids: Vec<i32> = admins.iter().map(|a| a.id).collect();
        let mut roles_by_admin = self.get_roles_for_admins(&admin_ids).await?;

        let items = admins
            .into_iter()
            .map(|admin| AdminWithRoles {
                roles: roles_by_admin.remove(&admin.id).unwrap_or_default(),
                admin: AdminUser::from_entity(admin),
            })
            .collect();

        Ok(Paginated::new(items, total, page, per_page))
    }

    async fn get_roles_for_admins(
        &self,
        admin_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<Role>>, DbErr> {
        if admin_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = entity::prelude::AdminUserRole::find()
            .filter(entity::admin_user_role::Column::AdminUserId.is_in(admin_ids.to_vec()))
            .find_also_related(entity::prelude::Role)
            .all(self.db)
            .await?;

        let mut map: HashMap<i32, Vec<Role>> = HashMap::new();
        for (assignment, role) in rows {
            if let Some(role) = role {
                map.entry(assignment.admin_user_id)
                    .or_default()
                    .push(Role::from_entity(role));
            }
        }
        for roles in map.values_mut() {
            roles.sort_by(|a, b| b.level.cmp(&a.level).then(a.id.cmp(&b.id)));
        }

        Ok(map)
    }

    /// Updates name, email and active flag, then replaces the role assignments.
    ///
    /// # Returns
    /// - `Ok(Some(AdminUser))` - The updated admin
    /// - `Ok(None)` - No admin with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, params: UpdateAdminUserParams) -> Result<Option<AdminUser>, DbErr> {
        let Some(admin) = entity::prelude::AdminUser::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::admin_user::ActiveModel = admin.into();
        active.name = ActiveValue::Set(params.name);
        active.email = ActiveValue::Set(params.email);
        active.is_active = ActiveValue::Set(params.is_active);
        active.updated_at = ActiveValue::Set(Utc::now());
        let admin = active.update(self.db).await?;

        self.set_roles(admin.id, &params.role_ids).await?;

        Ok(Some(AdminUser::from_entity(admin)))
    }

    /// Replaces an admin's role assignments with `role_ids`, ignoring duplicates.
    pub async fn set_roles(&self, admin_id: i32, role_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::AdminUserRole::delete_many()
            .filter(entity::admin_user_role::Column::AdminUserId.eq(admin_id))
            .exec(self.db)
            .await?;

        let mut seen = Vec::with_capacity(role_ids.len());
        for &role_id in role_ids {
            if seen.contains(&role_id) {
                continue;
            }
            seen.push(role_id);

            entity::admin_user_role::ActiveModel {
                admin_user_id: ActiveValue::Set(admin_id),
                role_id: ActiveValue::Set(role_id),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    pub async fn update_password(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::admin_user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            password_hash: ActiveValue::Set(password_hash),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn touch_last_login(&self, id: i32) -> Result<(), DbErr> {
        entity::admin_user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            last_login_at: ActiveValue::Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Deletes an admin. Role assignments are removed by cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - The admin existed and was deleted
    /// - `Ok(false)` - No admin with that id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::AdminUser::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts active admins holding the active Super Admin role.
    pub async fn count_active_super_admins(&self) -> Result<u64, DbErr> {
        entity::prelude::AdminUser::find()
            .join(
                JoinType::InnerJoin,
                entity::admin_user::Relation::AdminUserRole.def(),
            )
            .join(
                JoinType::InnerJoin,
                entity::admin_user_role::Relation::Role.def(),
            )
            .filter(entity::admin_user::Column::IsActive.eq(true))
            .filter(entity::role::Column::Name.eq(SUPER_ADMIN_ROLE))
            .filter(entity::role::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }

    /// Checks whether any active Super Admin exists.
    pub async fn super_admin_exists(&self) -> Result<bool, DbErr> {
        Ok(self.count_active_super_admins().await? > 0)
    }
}
