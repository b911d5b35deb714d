//! In-memory cache of effective admin permissions.
//!
//! Every guarded request needs the union of permission keys over the admin's active roles.
//! The result is cached per admin and invalidated by the services that change roles:
//! per admin when their assignments change, entirely when a role's permissions, active
//! flag or existence change. Every invalidation bumps a generation counter, and a load that
//! started before the bump is returned to its caller but never cached.

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use sea_orm::ConnectionTrait;
use tokio::sync::RwLock;

use crate::server::{
    data::{permission::PermissionRepository, role::RoleRepository},
    error::{auth::AuthError, AppError},
};

/// Permissions an admin holds through their active roles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectivePermissions {
    pub keys: BTreeSet<String>,
    /// Highest level over the admin's active roles, 0 without roles.
    pub max_level: i32,
    pub is_super_admin: bool,
}

impl EffectivePermissions {
    pub fn has(&self, key: &str) -> bool {
        self.is_super_admin || self.keys.contains(key)
    }

    /// Whether a role of `level` sits strictly below this admin.
    pub fn outranks(&self, level: i32) -> bool {
        self.is_super_admin || level < self.max_level
    }

    /// Fails with `InsufficientLevel` unless this admin outranks `level`.
    pub fn ensure_outranks(&self, admin_id: i32, level: i32) -> Result<(), AuthError> {
        if self.outranks(level) {
            return Ok(());
        }

        Err(AuthError::InsufficientLevel {
            admin_id,
            actor_level: self.max_level,
            target_level: level,
        })
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<i32, Arc<EffectivePermissions>>,
    generation: u64,
}

#[derive(Clone, Default)]
pub struct PermissionCache {
    state: Arc<RwLock<CacheState>>,
}

impl PermissionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached permissions for `admin_id`, loading them on a miss.
    ///
    /// # Returns
    /// - `Ok(Arc<EffectivePermissions>)` - Cached or freshly loaded permissions
    /// - `Err(AppError::DbErr)` - Loading from the database failed
    pub async fn get_or_load<C: ConnectionTrait>(
        &self,
        db: &C,
        admin_id: i32,
    ) -> Result<Arc<EffectivePermissions>, AppError> {
        let generation = {
            let state = self.state.read().await;
            if let Some(cached) = state.entries.get(&admin_id) {
                return Ok(cached.clone());
            }
            state.generation
        };

        let loaded = Arc::new(Self::load(db, admin_id).await?);
        self.store(admin_id, generation, loaded.clone()).await;

        Ok(loaded)
    }

    /// Caches `permissions` unless an invalidation happened since `generation` was read.
    async fn store(&self, admin_id: i32, generation: u64, permissions: Arc<EffectivePermissions>) {
        let mut state = self.state.write().await;
        if state.generation == generation {
            state.entries.insert(admin_id, permissions);
        }
    }

    async fn load<C: ConnectionTrait>(
        db: &C,
        admin_id: i32,
    ) -> Result<EffectivePermissions, AppError> {
        let role_repo = RoleRepository::new(db);
        let roles = role_repo.get_active_roles_for_admin(admin_id).await?;

        let is_super_admin = roles.iter().any(|r| r.is_super_admin());
        let max_level = roles.iter().map(|r| r.level).max().unwrap_or(0);

        let keys: BTreeSet<String> = if is_super_admin {
            PermissionRepository::new(db)
                .get_all()
                .await?
                .into_iter()
                .map(|p| p.key)
                .collect()
        } else {
            let role_ids: Vec<i32> = roles.iter().map(|r| r.id).collect();
            role_repo
                .get_permission_keys(&role_ids)
                .await?
                .into_iter()
                .collect()
        };

        Ok(EffectivePermissions {
            keys,
            max_level,
            is_super_admin,
        })
    }

    /// Drops the cached entry of one admin.
    pub async fn invalidate_admin(&self, admin_id: i32) {
        let mut state = self.state.write().await;
        state.entries.remove(&admin_id);
        state.generation += 1;
    }

    /// Drops every cached entry.
    pub async fn invalidate_all(&self) {
        let mut state = self.state.write().await;
        state.entries.clear();
        state.generation += 1;
    }

    #[cfg(test)]
    pub async fn is_cached(&self, admin_id: i32) -> bool {
        self.state.read().await.entries.contains_key(&admin_id)
    }
}
