use super::*;

/// Tests that a driver response stamps `responded_at`.
///
/// Expected: Ok with status accepted and a response time
#[tokio::test]
async fn stamps_response_time() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    let driver = factory::create_verified_driver(db).await?;
    let pending = factory::create_match(db, driver.id, request.id).await?;

    let repo = DriverMatchRepository::new(db);
    let accepted = repo
        .set_status(pending.id, MatchStatus::Accepted, Some(Utc::now()))
        .await?
        .unwrap();

    assert_eq!(accepted.status, MatchStatus::Accepted);
    assert!(accepted.responded_at.is_some());
    assert_eq!(repo.get_active_for_driver(driver.id).await?.len(), 1);

    Ok(())
}
