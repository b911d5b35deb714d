//! Admin user factory for creating test back-office accounts.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Placeholder stored as password hash when a test does not need to log in.
pub const PLACEHOLDER_PASSWORD_HASH: &str = "not-a-real-hash";

/// Factory for creating test admin users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::admin_user::AdminUserFactory;
///
/// let admin = AdminUserFactory::new(&db)
///     .email("ops@example.com")
///     .password_hash(hash)
///     .build()
///     .await?;
/// ```
pub struct AdminUserFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    email: String,
    password_hash: String,
    is_active: bool,
}

impl<'a> AdminUserFactory<'a> {
    /// Creates a new AdminUserFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Admin {id}"`
    /// - email: `"admin{id}@example.com"`
    /// - password_hash: [`PLACEHOLDER_PASSWORD_HASH`]
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Admin {}", id),
            email: format!("admin{}@example.com", id),
            password_hash: PLACEHOLDER_PASSWORD_HASH.to_string(),
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the stored password hash. Tests that log in must pass a real argon2 hash.
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the admin user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::admin_user::Model)` - Created admin user
    /// - `Err(DbErr)` - Database error during insert (e.g. duplicate email)
    pub async fn build(self) -> Result<entity::admin_user::Model, DbErr> {
        let now = Utc::now();
        entity::admin_user::ActiveModel {
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            is_active: ActiveValue::Set(self.is_active),
            last_login_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active admin user with default values.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::admin_user::Model, DbErr> {
    AdminUserFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_admin_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(AdminUser).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let admin = create_admin(db).await?;

        assert!(admin.email.ends_with("@example.com"));
        assert!(admin.is_active);
        assert_eq!(admin.password_hash, PLACEHOLDER_PASSWORD_HASH);

        Ok(())
    }

    #[tokio::test]
    async fn creates_admin_with_custom_values() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(AdminUser).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let admin = AdminUserFactory::new(db)
            .name("Ops")
            .email("ops@example.com")
            .active(false)
            .build()
            .await?;

        assert_eq!(admin.name, "Ops");
        assert_eq!(admin.email, "ops@example.com");
        assert!(!admin.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_duplicate_email() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(AdminUser).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        AdminUserFactory::new(db).email("dup@example.com").build().await?;
        let result = AdminUserFactory::new(db).email("dup@example.com").build().await;

        assert!(result.is_err());

        Ok(())
    }
}
