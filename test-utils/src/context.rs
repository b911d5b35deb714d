use sea_orm::{
    sea_query::TableCreateStatement, ActiveModelTrait, ActiveValue, ConnectionTrait, Database,
    DatabaseConnection,
};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Test context holding an in-memory database and an optional session.
///
/// The database connection is created on first access and shared for the lifetime of the
/// context. The session is backed by the same SQLite pool so session-guarded services can be
/// exercised without an HTTP layer.
pub struct TestContext {
    /// Connection to the in-memory SQLite instance, created lazily.
    pub db: Option<DatabaseConnection>,

    /// Session stored in the same database, created lazily by `session()`.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates an empty context with no connection or session yet.
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to connect to in-memory SQLite database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            let db = Database::connect("sqlite::memory:").await?;
            self.db = Some(db);
        }

        Ok(self.db.as_ref().expect("database initialized above"))
    }

    /// Executes the provided CREATE TABLE statements in order.
    ///
    /// Called by `TestBuilder::build()`; tables referencing other tables must come after them.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Gets or creates a session backed by the in-memory database.
    ///
    /// On first call the session table is migrated and a fresh session with a 7 day
    /// inactivity expiry is created. Later calls return the same session.
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let db = self.database().await?;

            let pool = db.get_sqlite_connection_pool();
            let session_store = SqliteStore::new(pool.clone());

            session_store
                .migrate()
                .await
                .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

            let session = Session::new(
                None,
                Arc::new(session_store),
                Some(Expiry::OnInactivity(Duration::days(7))),
            );

            self.session = Some(session);
        }

        Ok(self.session.as_ref().expect("session initialized above"))
    }

    /// Gets both the database and the session, initializing whichever is missing.
    ///
    /// Avoids holding two mutable borrows when a test needs both.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.database().await?;
        self.session().await?;

        Ok((
            self.db.as_ref().expect("database initialized above"),
            self.session.as_ref().expect("session initialized above"),
        ))
    }

    /// Inserts permission rows for the given keys.
    ///
    /// Tests built from entities do not run the seed migration, so any permission key a
    /// role needs has to be inserted first.
    ///
    /// # Returns
    /// - `Ok(Vec<entity::permission::Model>)` - Inserted permissions in input order
    /// - `Err(TestError::Database)` - Insert failed (e.g. duplicate key)
    pub async fn seed_permissions(
        &mut self,
        keys: &[&str],
    ) -> Result<Vec<entity::permission::Model>, TestError> {
        let db = self.database().await?;
        let mut permissions = Vec::with_capacity(keys.len());

        for key in keys {
            let permission = entity::permission::ActiveModel {
                key: ActiveValue::Set(key.to_string()),
                description: ActiveValue::Set(format!("Test permission {}", key)),
                ..Default::default()
            }
            .insert(db)
            .await?;
            permissions.push(permission);
        }

        Ok(permissions)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
