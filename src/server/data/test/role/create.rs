use super::*;

/// Tests creating a role with permission keys.
///
/// Verifies that known keys are granted and the detail view reports them sorted along
/// with an admin count of zero.
///
/// Expected: Ok with two permissions
#[tokio::test]
async fn creates_role_with_permissions() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    test.seed_permissions(&["drivers.view", "drivers.verify", "roles.manage"])
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleRepository::new(db);
    let role = repo
        .create(RoleParams {
            name: "Reviewer".to_string(),
            description: Some("Reviews KYC".to_string()),
            level: 15,
            is_active: true,
            permissions: vec!["drivers.verify".to_string(), "drivers.view".to_string()],
        })
        .await?;

    let detail = repo.get_by_id(role.id).await?.unwrap();
    assert_eq!(detail.role.level, 15);
    assert_eq!(detail.permissions, vec!["drivers.verify", "drivers.view"]);
    assert_eq!(detail.admin_count, 0);

    Ok(())
}

/// Tests that unknown permission keys are reported by the permission repository.
///
/// Expected: Ok with only the unknown key
#[tokio::test]
async fn reports_unknown_permission_keys() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    test.seed_permissions(&["drivers.view"]).await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PermissionRepository::new(db);
    let unknown = repo
        .find_unknown_keys(&["drivers.view".to_string(), "drivers.fly".to_string()])
        .await?;

    assert_eq!(unknown, vec!["drivers.fly".to_string()]);

    Ok(())
}
