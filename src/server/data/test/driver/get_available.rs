use super::*;

/// Tests that only active, verified drivers without an active match are available.
///
/// Verifies that a driver whose only match was declined is available again while
/// suspended, unverified and busy drivers are not.
///
/// Expected: Ok with the two free drivers ordered by id
#[tokio::test]
async fn returns_free_verified_drivers_in_id_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request) = factory::helpers::create_request_with_company(db).await?;

    let free = factory::create_verified_driver(db).await?;
    let declined = factory::create_verified_driver(db).await?;
    factory::driver_match::DriverMatchFactory::new(db, declined.id, request.id)
        .status("declined")
        .build()
        .await?;
    let busy = factory::create_verified_driver(db).await?;
    factory::driver_match::DriverMatchFactory::new(db, busy.id, request.id)
        .status("accepted")
        .build()
        .await?;
    factory::driver::DriverFactory::new(db)
        .with_kyc_details()
        .kyc_step(3)
        .verification_status("verified")
        .status("suspended")
        .build()
        .await?;
    factory::create_driver(db).await?;

    let repo = DriverRepository::new(db);
    let available = repo.get_available().await?;

    let ids: Vec<i32> = available.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![free.id, declined.id]);
    assert!(repo.is_available(free.id).await?);
    assert!(!repo.is_available(busy.id).await?);

    Ok(())
}
