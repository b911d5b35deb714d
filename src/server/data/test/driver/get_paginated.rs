use super::*;

/// Tests filtering drivers by verification status and search term together.
///
/// Expected: Ok with the single verified driver named "Amaka"
#[tokio::test]
async fn combines_filters() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::driver::DriverFactory::new(db)
        .name("Amaka", "Obi")
        .verification_status("verified")
        .build()
        .await?;
    factory::driver::DriverFactory::new(db)
        .name("Amaka", "Eze")
        .verification_status("pending")
        .build()
        .await?;
    factory::create_verified_driver(db).await?;

    let repo = DriverRepository::new(db);
    let page = repo
        .get_paginated(
            &DriverFilter {
                search: Some("Amaka".to_string()),
                verification_status: Some(VerificationStatus::Verified),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].last_name, "Obi");

    Ok(())
}

/// Tests the `available` filter in both directions.
///
/// Expected: Ok with the free verified driver as available and the rest unavailable
#[tokio::test]
async fn filters_by_availability() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let free = factory::create_verified_driver(db).await?;
    let busy = factory::create_verified_driver(db).await?;
    factory::create_driver(db).await?;
    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    factory::create_match(db, busy.id, request.id).await?;

    let repo = DriverRepository::new(db);
    let available = repo
        .get_paginated(
            &DriverFilter {
                available: Some(true),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    let unavailable = repo
        .get_paginated(
            &DriverFilter {
                available: Some(false),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(available.total, 1);
    assert_eq!(available.items[0].id, free.id);
    assert_eq!(unavailable.total, 2);

    Ok(())
}
