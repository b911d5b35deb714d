use super::*;

/// Tests a request without an admin in the session.
///
/// Expected: Err(AuthError::NotLoggedIn)
#[tokio::test]
async fn rejects_missing_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let cache = PermissionCache::new();

    let result = AuthGuard::new(db, &cache, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotLoggedIn))
    ));

    Ok(())
}

/// Tests a session pointing at an admin that no longer exists.
///
/// Expected: Err(AuthError::UnknownAccount)
#[tokio::test]
async fn rejects_deleted_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let cache = PermissionCache::new();

    AdminSession::new(session).set_admin_id(42).await?;

    let result = AuthGuard::new(db, &cache, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UnknownAccount(42)))
    ));

    Ok(())
}

/// Tests a deactivated admin with a live session.
///
/// Expected: Err(AuthError::AccountInactive)
#[tokio::test]
async fn rejects_inactive_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let cache = PermissionCache::new();
    let admin = factory::admin_user::AdminUserFactory::new(db)
        .active(false)
        .build()
        .await?;

    AdminSession::new(session).set_admin_id(admin.id).await?;

    let result = AuthGuard::new(db, &cache, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive(_)))
    ));

    Ok(())
}

/// Tests an admin whose roles grant every required permission.
///
/// Expected: Ok(AdminAccess) with the role's keys
#[tokio::test]
async fn grants_access_with_all_permissions() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let cache = PermissionCache::new();
    let (admin, _) = factory::helpers::create_admin_with_role(
        db,
        "Verifier",
        40,
        &["drivers.view", "drivers.verify"],
    )
    .await?;

    AdminSession::new(session).set_admin_id(admin.id).await?;

    let access = AuthGuard::new(db, &cache, session)
        .require(&[Permission::DriversView, Permission::DriversVerify])
        .await?;

    assert_eq!(access.id(), admin.id);
    assert_eq!(access.permissions.max_level, 40);
    assert_eq!(
        access.permissions.keys(),
        vec!["drivers.verify".to_string(), "drivers.view".to_string()]
    );

    Ok(())
}

/// Tests that one missing permission denies the whole check.
///
/// Expected: Err(AuthError::AccessDenied) naming the missing key
#[tokio::test]
async fn fails_if_any_permission_missing() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let cache = PermissionCache::new();
    let (admin, _) =
        factory::helpers::create_admin_with_role(db, "Viewer", 10, &["drivers.view"]).await?;

    AdminSession::new(session).set_admin_id(admin.id).await?;

    let result = AuthGuard::new(db, &cache, session)
        .require(&[Permission::DriversView, Permission::DriversManage])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(admin_id, msg))) => {
            assert_eq!(admin_id, admin.id);
            assert!(msg.contains("drivers.manage"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}

/// Tests that permissions of an inactive role are ignored.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn ignores_inactive_roles() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let cache = PermissionCache::new();
    let admin = factory::create_admin(db).await?;
    let role = factory::role::RoleFactory::new(db)
        .name("Retired")
        .level(50)
        .active(false)
        .build()
        .await?;
    factory::role::grant_permissions(db, role.id, &["payments.view"]).await?;
    factory::assign_role(db, admin.id, role.id).await?;

    AdminSession::new(session).set_admin_id(admin.id).await?;

    let result = AuthGuard::new(db, &cache, session)
        .require(&[Permission::PaymentsView])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests the super admin role bypassing permission checks.
///
/// Expected: Ok(AdminAccess) for permissions the role never received
#[tokio::test]
async fn super_admin_passes_every_check() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let cache = PermissionCache::new();
    let (admin, _) = factory::helpers::create_admin_with_role(db, "Super Admin", 100, &[]).await?;

    AdminSession::new(session).set_admin_id(admin.id).await?;

    let access = AuthGuard::new(db, &cache, session)
        .require(&Permission::ALL)
        .await?;

    assert!(access.permissions.is_super_admin);

    Ok(())
}

/// Tests that a logged out admin is treated as anonymous.
///
/// Expected: Err(AuthError::NotLoggedIn) after logout
#[tokio::test]
async fn logout_clears_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let cache = PermissionCache::new();
    let admin = factory::create_admin(db).await?;

    let admin_session = AdminSession::new(session);
    admin_session.set_admin_id(admin.id).await?;
    admin_session.logout().await?;

    let result = AuthGuard::new(db, &cache, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotLoggedIn))
    ));

    Ok(())
}
