use super::*;

/// Tests that only pending and accepted matches count as active.
///
/// Expected: Ok(2)
#[tokio::test]
async fn counts_pending_and_accepted() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    for status in ["pending", "accepted", "declined", "cancelled", "completed"] {
        let driver = factory::create_verified_driver(db).await?;
        factory::driver_match::DriverMatchFactory::new(db, driver.id, request.id)
            .status(status)
            .build()
            .await?;
    }

    let repo = DriverMatchRepository::new(db);

    assert_eq!(repo.count_active_for_request(request.id).await?, 2);

    Ok(())
}

/// Tests creating a manual match and listing it through the filters.
///
/// Expected: Ok with a pending, non-automatic match found by driver filter
#[tokio::test]
async fn created_match_is_pending_and_listed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    let driver = factory::create_verified_driver(db).await?;

    let repo = DriverMatchRepository::new(db);
    let created = repo
        .create(CreateMatchParams {
            driver_id: driver.id,
            company_request_id: request.id,
            auto_matched: false,
            matched_by: Some(7),
        })
        .await?;

    assert_eq!(created.status, MatchStatus::Pending);
    assert_eq!(created.matched_by, Some(7));

    let page = repo
        .get_paginated(
            &MatchFilter {
                driver_id: Some(driver.id),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, created.id);

    Ok(())
}
