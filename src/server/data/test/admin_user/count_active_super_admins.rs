use super::*;

/// Tests counting active Super Admins.
///
/// Verifies that inactive admins and admins holding other roles are not counted.
///
/// Expected: Ok(1)
#[tokio::test]
async fn counts_only_active_super_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let super_role = factory::role::RoleFactory::new(db)
        .name(SUPER_ADMIN_ROLE)
        .level(100)
        .build()
        .await?;
    let other_role = factory::create_role(db).await?;

    let active = factory::create_admin(db).await?;
    factory::assign_role(db, active.id, super_role.id).await?;

    let inactive = factory::admin_user::AdminUserFactory::new(db)
        .active(false)
        .build()
        .await?;
    factory::assign_role(db, inactive.id, super_role.id).await?;

    let regular = factory::create_admin(db).await?;
    factory::assign_role(db, regular.id, other_role.id).await?;

    let repo = AdminUserRepository::new(db);

    assert_eq!(repo.count_active_super_admins().await?, 1);
    assert!(repo.super_admin_exists().await?);

    Ok(())
}

/// Tests that no Super Admin is reported on an empty table.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_no_super_admin_when_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AdminUserRepository::new(db);

    assert!(!repo.super_admin_exists().await?);

    Ok(())
}
