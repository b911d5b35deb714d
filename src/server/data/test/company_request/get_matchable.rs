use super::*;

/// Tests that matchable requests are open or partially matched, oldest first.
///
/// Expected: Ok with the two matchable requests in creation order
#[tokio::test]
async fn returns_open_requests_oldest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let company = factory::create_company(db).await?;
    let now = Utc::now();

    let newer = factory::company_request::CompanyRequestFactory::new(db, company.id)
        .created_at(now - Duration::hours(1))
        .build()
        .await?;
    let older = factory::company_request::CompanyRequestFactory::new(db, company.id)
        .status("partially_matched")
        .created_at(now - Duration::hours(5))
        .build()
        .await?;
    factory::company_request::CompanyRequestFactory::new(db, company.id)
        .status("matched")
        .created_at(now - Duration::hours(9))
        .build()
        .await?;
    factory::company_request::CompanyRequestFactory::new(db, company.id)
        .status("cancelled")
        .build()
        .await?;

    let repo = CompanyRequestRepository::new(db);
    let matchable = repo.get_matchable().await?;

    let ids: Vec<i32> = matchable.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);

    Ok(())
}
