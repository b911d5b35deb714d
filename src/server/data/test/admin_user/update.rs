use super::*;

/// Tests that updating an admin replaces the role set.
///
/// Expected: Ok with the new role only and the new name stored
#[tokio::test]
async fn replaces_roles_and_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let old_role = factory::create_role(db).await?;
    let new_role = factory::create_role(db).await?;
    let admin = factory::create_admin(db).await?;
    factory::assign_role(db, admin.id, old_role.id).await?;

    let repo = AdminUserRepository::new(db);
    let updated = repo
        .update(UpdateAdminUserParams {
            id: admin.id,
            name: "Renamed".to_string(),
            email: admin.email.clone(),
            is_active: false,
            role_ids: vec![new_role.id],
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert!(!updated.is_active);

    let roles = repo.get_roles(admin.id).await?;
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, new_role.id);

    Ok(())
}

/// Tests updating an admin that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AdminUserRepository::new(db);
    let result = repo
        .update(UpdateAdminUserParams {
            id: 404,
            name: "Nobody".to_string(),
            email: "nobody@example.com".to_string(),
            is_active: true,
            role_ids: vec![],
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
