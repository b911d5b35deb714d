//! Type-safe session management wrappers.
//!
//! Admins and drivers authenticate against different tables, so each has its own session
//! key and wrapper. Both wrap the same underlying `Session`; an admin logout leaves a
//! driver login in the same browser untouched and vice versa.

use tower_sessions::Session;

use crate::server::error::AppError;

const SESSION_AUTH_ADMIN_ID: &str = "auth:admin";
const SESSION_AUTH_DRIVER_ID: &str = "auth:driver";

/// Back-office authentication state.
pub struct AdminSession<'a> {
    session: &'a Session,
}

impl<'a> AdminSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the admin id after a successful login.
    ///
    /// The session id is cycled first so a pre-login session id cannot be reused.
    ///
    /// # Returns
    /// - `Ok(())` - Admin id stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write to the session store
    pub async fn set_admin_id(&self, admin_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_ADMIN_ID, admin_id).await?;
        Ok(())
    }

    /// Retrieves the logged-in admin id.
    ///
    /// # Returns
    /// - `Ok(Some(admin_id))` - An admin is logged in
    /// - `Ok(None)` - No admin in session
    /// - `Err(AppError::SessionErr(_))` - Failed to read the session
    pub async fn get_admin_id(&self) -> Result<Option<i32>, AppError> {
        Ok(self.session.get::<i32>(SESSION_AUTH_ADMIN_ID).await?)
    }

    /// Removes the admin id from the session.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.remove::<i32>(SESSION_AUTH_ADMIN_ID).await?;
        Ok(())
    }
}

/// Driver portal authentication state.
pub struct DriverSession<'a> {
    session: &'a Session,
}

impl<'a> DriverSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_driver_id(&self, driver_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_DRIVER_ID, driver_id).await?;
        Ok(())
    }

    pub async fn get_driver_id(&self) -> Result<Option<i32>, AppError> {
        Ok(self.session.get::<i32>(SESSION_AUTH_DRIVER_ID).await?)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.remove::<i32>(SESSION_AUTH_DRIVER_ID).await?;
        Ok(())
    }
}
