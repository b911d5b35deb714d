use super::*;

/// Tests moving only the selected statuses of one request.
///
/// Verifies that accepted matches complete, pending matches are untouched by that call,
/// and matches of other requests are never changed.
///
/// Expected: Ok(1) for each transition
#[tokio::test]
async fn moves_only_selected_statuses() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (company, request) = factory::helpers::create_request_with_company(db).await?;
    let other_request = factory::create_request(db, company.id).await?;

    let accepted_driver = factory::create_verified_driver(db).await?;
    let accepted = factory::driver_match::DriverMatchFactory::new(db, accepted_driver.id, request.id)
        .status("accepted")
        .build()
        .await?;
    let pending_driver = factory::create_verified_driver(db).await?;
    let pending = factory::create_match(db, pending_driver.id, request.id).await?;
    let other_driver = factory::create_verified_driver(db).await?;
    let other = factory::create_match(db, other_driver.id, other_request.id).await?;

    let repo = DriverMatchRepository::new(db);

    let completed = repo
        .transition_for_request(request.id, &[MatchStatus::Accepted], MatchStatus::Completed)
        .await?;
    let cancelled = repo
        .transition_for_request(request.id, &[MatchStatus::Pending], MatchStatus::Cancelled)
        .await?;

    assert_eq!(completed, 1);
    assert_eq!(cancelled, 1);
    assert_eq!(
        repo.find_by_id(accepted.id).await?.unwrap().status,
        MatchStatus::Completed
    );
    assert_eq!(
        repo.find_by_id(pending.id).await?.unwrap().status,
        MatchStatus::Cancelled
    );
    assert_eq!(
        repo.find_by_id(other.id).await?.unwrap().status,
        MatchStatus::Pending
    );

    Ok(())
}
