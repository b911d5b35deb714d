use super::*;

/// Tests the dashboard counters across drivers, companies, requests and matches.
///
/// Expected: Ok with counts reflecting the seeded rows and zeros for empty statuses
#[tokio::test]
async fn counts_every_area() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    factory::company::CompanyFactory::new(db)
        .active(false)
        .build()
        .await?;
    let busy = factory::create_verified_driver(db).await?;
    factory::create_verified_driver(db).await?;
    factory::driver::DriverFactory::new(db)
        .status("suspended")
        .verification_status("pending")
        .build()
        .await?;
    factory::create_match(db, busy.id, request.id).await?;

    let stats = StatsRepository::new(db).collect().await?;

    assert_eq!(stats.drivers_total, 3);
    assert_eq!(stats.drivers_active, 2);
    assert_eq!(stats.drivers_available, 1);
    assert_eq!(stats.drivers_by_verification_status["verified"], 2);
    assert_eq!(stats.drivers_by_verification_status["pending"], 1);
    assert_eq!(stats.drivers_by_verification_status["rejected"], 0);
    assert_eq!(stats.companies_total, 2);
    assert_eq!(stats.companies_active, 1);
    assert_eq!(stats.requests_by_status["open"], 1);
    assert_eq!(stats.matches_by_status["pending"], 1);
    assert_eq!(stats.payments_succeeded, 0);

    Ok(())
}
