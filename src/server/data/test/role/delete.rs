use super::*;

/// Tests that deleting a role removes its permission grants.
///
/// Expected: Ok(true) and no remaining keys for the role id
#[tokio::test]
async fn deletes_role_and_grants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role_with_permissions(db, 10, &["drivers.view"]).await?;

    let repo = RoleRepository::new(db);

    assert!(repo.delete(role.id).await?);
    assert!(repo.find_by_id(role.id).await?.is_none());
    assert!(repo.get_permission_keys(&[role.id]).await?.is_empty());
    assert!(!repo.delete(role.id).await?);

    Ok(())
}

/// Tests counting admins assigned to a role.
///
/// Expected: Ok(2)
#[tokio::test]
async fn counts_assigned_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;
    for _ in 0..2 {
        let admin = factory::create_admin(db).await?;
        factory::assign_role(db, admin.id, role.id).await?;
    }

    let repo = RoleRepository::new(db);

    assert_eq!(repo.admin_count(role.id).await?, 2);

    Ok(())
}
