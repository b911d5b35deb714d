use super::*;
use crate::server::{
    error::auth::AuthError,
    model::role::{RoleParams, SUPER_ADMIN_ROLE},
    service::role::RoleService,
};
use test_utils::{builder::TestBuilder, factory};

fn params(name: &str, level: i32, permissions: &[&str]) -> RoleParams {
    RoleParams {
        name: name.to_string(),
        description: None,
        level,
        is_active: true,
        permissions: permissions.iter().map(|k| k.to_string()).collect(),
    }
}

/// Tests that an admin can create a role strictly below their own level.
///
/// Expected: Ok with the permissions stored sorted and deduplicated
#[tokio::test]
async fn creates_role_below_actor_level() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, _) = factory::helpers::create_admin_with_role(
        db,
        "Manager",
        50,
        &["roles.manage", "drivers.view", "drivers.verify"],
    )
    .await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;

    let created = RoleService::new(db, &cache)
        .create(
            &actor,
            params("Reviewer", 40, &["drivers.verify", "drivers.view", "drivers.view"]),
        )
        .await?;

    assert_eq!(created.role.name, "Reviewer");
    assert_eq!(created.role.level, 40);
    assert_eq!(created.permissions, vec!["drivers.verify", "drivers.view"]);

    Ok(())
}

/// Tests that roles at or above the actor's level cannot be created or edited.
///
/// Expected: Err(InsufficientLevel) for equal and higher levels
#[tokio::test]
async fn level_ordering_blocks_equal_or_higher_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, _) =
        factory::helpers::create_admin_with_role(db, "Manager", 50, &["roles.manage"]).await?;
    let senior = factory::role::RoleFactory::new(db)
        .name("Director")
        .level(60)
        .build()
        .await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;
    let service = RoleService::new(db, &cache);

    let equal = service.create(&actor, params("Peer", 50, &[])).await;
    let edit_higher = service
        .update(&actor, senior.id, params("Director", 10, &[]))
        .await;

    assert!(matches!(
        equal,
        Err(AppError::AuthErr(AuthError::InsufficientLevel {
            actor_level: 50,
            target_level: 50,
            ..
        }))
    ));
    assert!(matches!(
        edit_higher,
        Err(AppError::AuthErr(AuthError::InsufficientLevel { .. }))
    ));

    Ok(())
}

/// Tests that the Super Admin role cannot be edited or deleted, even by a Super Admin.
///
/// Expected: Err(ProtectedRole)
#[tokio::test]
async fn super_admin_role_is_protected() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, role) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;
    let service = RoleService::new(db, &cache);

    let update = service
        .update(&actor, role.id, params("Renamed", 100, &[]))
        .await;
    let delete = service.delete(&actor, role.id).await;

    assert!(matches!(update, Err(AppError::AuthErr(AuthError::ProtectedRole))));
    assert!(matches!(delete, Err(AppError::AuthErr(AuthError::ProtectedRole))));

    Ok(())
}

/// Tests that unknown permission keys are rejected.
///
/// Expected: Err(Validation) naming the unknown key
#[tokio::test]
async fn rejects_unknown_permission_keys() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, _) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;

    let result = RoleService::new(db, &cache)
        .create(&actor, params("Support", 10, &["drivers.teleport"]))
        .await;

    assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("drivers.teleport")));

    Ok(())
}

/// Tests that editing a role drops cached permission sets.
///
/// Expected: Ok, the holder's cache entry is gone and reloads with the new keys
#[tokio::test]
async fn update_invalidates_permission_cache() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    test.seed_permissions(&["drivers.view", "companies.view"])
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, _) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;
    let (holder, role) =
        factory::helpers::create_admin_with_role(db, "Support", 10, &["drivers.view"]).await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;
    let before = cache.get_or_load(db, holder.id).await?;
    assert!(!before.has("companies.view"));

    RoleService::new(db, &cache)
        .update(&actor, role.id, params("Support", 10, &["companies.view"]))
        .await?;

    assert!(!cache.is_cached(holder.id).await);
    let after = cache.get_or_load(db, holder.id).await?;
    assert!(after.has("companies.view"));
    assert!(!after.has("drivers.view"));

    Ok(())
}

/// Tests that a role still assigned to admins cannot be deleted.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn delete_refuses_assigned_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, _) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;
    let (_, role) = factory::helpers::create_admin_with_role(db, "Support", 10, &[]).await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;

    let result = RoleService::new(db, &cache).delete(&actor, role.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
