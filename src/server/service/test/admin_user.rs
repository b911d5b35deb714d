use super::*;
use crate::server::{
    error::auth::AuthError,
    model::{admin::UpdateAdminUserParams, role::SUPER_ADMIN_ROLE},
    service::admin_user::{AdminUserService, NewAdminUser},
};
use test_utils::{builder::TestBuilder, factory};

/// Tests that the last active Super Admin cannot be deleted.
///
/// Expected: Err(LastSuperAdmin) and the Super Admin still present
#[tokio::test]
async fn refuses_to_delete_last_super_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (super_admin, _) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;
    let (manager, _) =
        factory::helpers::create_admin_with_role(db, "Manager", 90, &["admins.manage"]).await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, manager.id).await?;

    let result = AdminUserService::new(db, &cache)
        .delete(&actor, super_admin.id)
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::LastSuperAdmin))));
    assert!(AdminUserRepository::new(db)
        .find_by_id(super_admin.id)
        .await?
        .is_some());

    Ok(())
}

/// Tests that a Super Admin can delete another one while a second remains.
///
/// Expected: Ok and the target removed
#[tokio::test]
async fn deletes_super_admin_when_another_remains() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (actor_admin, role) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;
    let target = factory::create_admin(db).await?;
    factory::assign_role(db, target.id, role.id).await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, actor_admin.id).await?;

    AdminUserService::new(db, &cache)
        .delete(&actor, target.id)
        .await?;

    assert!(AdminUserRepository::new(db)
        .find_by_id(target.id)
        .await?
        .is_none());

    Ok(())
}

/// Tests that the only Super Admin cannot remove their own Super Admin role.
///
/// Expected: Err(LastSuperAdmin)
#[tokio::test]
async fn refuses_to_demote_last_super_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, _) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;
    let support = factory::role::RoleFactory::new(db)
        .name("Support")
        .level(10)
        .build()
        .await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;

    let result = AdminUserService::new(db, &cache)
        .update(
            &actor,
            UpdateAdminUserParams {
                id: admin.id,
                name: admin.name.clone(),
                email: admin.email.clone(),
                is_active: true,
                role_ids: vec![support.id],
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::LastSuperAdmin))));

    Ok(())
}

/// Tests that admins cannot delete themselves.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn refuses_self_deletion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, role) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;
    let other = factory::create_admin(db).await?;
    factory::assign_role(db, other.id, role.id).await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;

    let result = AdminUserService::new(db, &cache).delete(&actor, admin.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that roles at or above the actor's level cannot be handed out.
///
/// Expected: Err(InsufficientLevel) and no admin created
#[tokio::test]
async fn create_requires_outranking_assigned_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (manager, manager_role) =
        factory::helpers::create_admin_with_role(db, "Manager", 50, &["admins.manage"]).await?;
    let junior = factory::role::RoleFactory::new(db)
        .name("Support")
        .level(10)
        .build()
        .await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, manager.id).await?;
    let service = AdminUserService::new(db, &cache);

    let too_high = service
        .create(
            &actor,
            NewAdminUser {
                name: "Peer".to_string(),
                email: "peer@example.com".to_string(),
                password: "long-enough".to_string(),
                role_ids: vec![manager_role.id],
            },
        )
        .await;
    assert!(matches!(
        too_high,
        Err(AppError::AuthErr(AuthError::InsufficientLevel { .. }))
    ));

    let created = service
        .create(
            &actor,
            NewAdminUser {
                name: "Junior".to_string(),
                email: "Junior@Example.com".to_string(),
                password: "long-enough".to_string(),
                role_ids: vec![junior.id],
            },
        )
        .await?;
    assert_eq!(created.admin.email, "junior@example.com");
    assert_eq!(created.roles.len(), 1);
    assert_eq!(created.roles[0].id, junior.id);

    Ok(())
}

/// Tests that changing an admin's roles drops their cached permissions.
///
/// Expected: Ok and the cache entry removed
#[tokio::test]
async fn update_invalidates_target_cache() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (admin, _) =
        factory::helpers::create_admin_with_role(db, SUPER_ADMIN_ROLE, 100, &[]).await?;
    let (target, _) =
        factory::helpers::create_admin_with_role(db, "Support", 10, &["drivers.view"]).await?;

    let cache = PermissionCache::new();
    let actor = access_for(db, &cache, admin.id).await?;
    cache.get_or_load(db, target.id).await?;

    AdminUserService::new(db, &cache)
        .update(
            &actor,
            UpdateAdminUserParams {
                id: target.id,
                name: target.name.clone(),
                email: target.email.clone(),
                is_active: true,
                role_ids: vec![],
            },
        )
        .await?;

    assert!(!cache.is_cached(target.id).await);
    assert!(cache.get_or_load(db, target.id).await?.keys.is_empty());

    Ok(())
}
