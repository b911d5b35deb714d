use super::*;

/// Tests creating an admin with roles.
///
/// Verifies that the admin is stored active and every requested role is assigned once,
/// even when the same role id is passed twice.
///
/// Expected: Ok with admin and two distinct roles
#[tokio::test]
async fn creates_admin_with_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::role::RoleFactory::new(db).level(10).build().await?;
    let second = factory::role::RoleFactory::new(db).level(20).build().await?;

    let repo = AdminUserRepository::new(db);
    let admin = repo
        .create(CreateAdminUserParams {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role_ids: vec![first.id, second.id, first.id],
        })
        .await?;

    assert!(admin.is_active);
    assert!(admin.last_login_at.is_none());

    let with_roles = repo.get_with_roles(admin.id).await?.unwrap();
    assert_eq!(with_roles.roles.len(), 2);
    // Highest level first
    assert_eq!(with_roles.roles[0].id, second.id);

    Ok(())
}

/// Tests that email uniqueness is enforced by the table.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn fails_for_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::admin_user::AdminUserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    let repo = AdminUserRepository::new(db);
    let result = repo
        .create(CreateAdminUserParams {
            name: "Other".to_string(),
            email: "taken@example.com".to_string(),
            password_hash: "hash".to_string(),
            role_ids: vec![],
        })
        .await;

    assert!(result.is_err());
    assert!(repo.email_taken("taken@example.com", None).await?);

    Ok(())
}
