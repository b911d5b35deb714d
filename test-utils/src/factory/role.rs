//! Role factory plus helpers for granting permissions and assigning roles.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

/// Factory for creating test roles with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let role = RoleFactory::new(&db).name("Dispatcher").level(20).build().await?;
/// ```
pub struct RoleFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    description: Option<String>,
    level: i32,
    is_active: bool,
}

impl<'a> RoleFactory<'a> {
    /// Creates a new RoleFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Role {id}"`
    /// - description: `None`
    /// - level: `10`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Role {}", id),
            description: None,
            level: 10,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the role entity into the database.
    pub async fn build(self) -> Result<entity::role::Model, DbErr> {
        let now = Utc::now();
        entity::role::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            level: ActiveValue::Set(self.level),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active role with default values.
pub async fn create_role(db: &DatabaseConnection) -> Result<entity::role::Model, DbErr> {
    RoleFactory::new(db).build().await
}

/// Creates a role with the given level holding the given permission keys.
pub async fn create_role_with_permissions(
    db: &DatabaseConnection,
    level: i32,
    permission_keys: &[&str],
) -> Result<entity::role::Model, DbErr> {
    let role = RoleFactory::new(db).level(level).build().await?;
    grant_permissions(db, role.id, permission_keys).await?;

    Ok(role)
}

/// Grants permission keys to a role, creating permission rows that do not exist yet.
///
/// # Arguments
/// - `db` - Database connection
/// - `role_id` - Role receiving the permissions
/// - `permission_keys` - Permission keys to grant
///
/// # Returns
/// - `Ok(())` - All permissions granted
/// - `Err(DbErr)` - Database error during lookup or insert
pub async fn grant_permissions(
    db: &DatabaseConnection,
    role_id: i32,
    permission_keys: &[&str],
) -> Result<(), DbErr> {
    for key in permission_keys {
        let permission = match entity::prelude::Permission::find()
            .filter(entity::permission::Column::Key.eq(*key))
            .one(db)
            .await?
        {
            Some(permission) => permission,
            None => {
                entity::permission::ActiveModel {
                    key: ActiveValue::Set(key.to_string()),
                    description: ActiveValue::Set(format!("Test permission {}", key)),
                    ..Default::default()
                }
                .insert(db)
                .await?
            }
        };

        entity::role_permission::ActiveModel {
            role_id: ActiveValue::Set(role_id),
            permission_id: ActiveValue::Set(permission.id),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

/// Assigns a role to an admin user.
pub async fn assign_role(
    db: &DatabaseConnection,
    admin_user_id: i32,
    role_id: i32,
) -> Result<entity::admin_user_role::Model, DbErr> {
    entity::admin_user_role::ActiveModel {
        admin_user_id: ActiveValue::Set(admin_user_id),
        role_id: ActiveValue::Set(role_id),
        ..Default::default()
    }
    .insert(db)
    .await
}
