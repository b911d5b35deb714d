use super::*;

/// Tests searching admins by email substring.
///
/// Expected: Ok with only the matching admin and a total of 1
#[tokio::test]
async fn filters_by_search_term() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::admin_user::AdminUserFactory::new(db)
        .email("ops.lead@example.com")
        .build()
        .await?;
    factory::create_admin(db).await?;
    factory::create_admin(db).await?;

    let repo = AdminUserRepository::new(db);
    let page = repo.get_paginated(Some("ops.lead"), 0, 10).await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].admin.email, "ops.lead@example.com");

    Ok(())
}

/// Tests that pages are split by `per_page` and roles are attached to each admin.
///
/// Expected: Ok with 2 admins on page 0 and 1 on page 1
#[tokio::test]
async fn splits_pages_and_loads_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_access_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;
    for _ in 0..3 {
        let admin = factory::create_admin(db).await?;
        factory::assign_role(db, admin.id, role.id).await?;
    }

    let repo = AdminUserRepository::new(db);
    let first = repo.get_paginated(None, 0, 2).await?;
    let second = repo.get_paginated(None, 1, 2).await?;

    assert_eq!(first.total, 3);
    assert_eq!(first.total_pages(), 2);
    assert_eq!(first.items.len(), 2);
    assert_eq!(second.items.len(), 1);
    assert!(first
        .items
        .iter()
        .all(|a| a.roles.len() == 1 && a.roles[0].id == role.id));

    Ok(())
}
