use super::*;

/// Tests that permission keys across several roles are merged without duplicates.
///
/// Expected: Ok with the sorted union of keys
#[tokio::test]
async fn merges_keys_across_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first =
        factory::create_role_with_permissions(db, 10, &["drivers.view", "matches.view"]).await?;
    let second =
        factory::create_role_with_permissions(db, 20, &["matches.view", "companies.view"]).await?;

    let repo = RoleRepository::new(db);
    let keys = repo.get_permission_keys(&[first.id, second.id]).await?;

    assert_eq!(keys, vec!["companies.view", "drivers.view", "matches.view"]);

    Ok(())
}

/// Tests that inactive roles are excluded from an admin's active roles.
///
/// Expected: Ok with only the active role
#[tokio::test]
async fn skips_inactive_roles_for_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let active = factory::create_role(db).await?;
    let inactive = factory::role::RoleFactory::new(db).active(false).build().await?;
    factory::assign_role(db, admin.id, active.id).await?;
    factory::assign_role(db, admin.id, inactive.id).await?;

    let repo = RoleRepository::new(db);
    let roles = repo.get_active_roles_for_admin(admin.id).await?;

    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, active.id);

    Ok(())
}
