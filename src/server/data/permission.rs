use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::server::model::role::Permission;

pub struct PermissionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PermissionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets every permission ordered by key.
    pub async fn get_all(&self) -> Result<Vec<Permission>, DbErr> {
        let permissions = entity::prelude::Permission::find()
            .order_by_asc(entity::permission::Column::Key)
            .all(self.db)
            .await?;

        Ok(permissions.into_iter().map(Permission::from_entity).collect())
    }

    /// Returns the keys from `keys` that have no permission row.
    pub async fn find_unknown_keys(&self, keys: &[String]) -> Result<Vec<String>, DbErr> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let known: Vec<String> = entity::prelude::Permission::find()
            .filter(entity::permission::Column::Key.is_in(keys.to_vec()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|p| p.key)
            .collect();

        Ok(keys
            .iter()
            .filter(|key| !known.contains(key))
            .cloned()
            .collect())
    }
}
