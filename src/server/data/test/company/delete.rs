use super::*;

/// Tests that deleting a company removes its requests.
///
/// Expected: Ok(true) and the request no longer found
#[tokio::test]
async fn cascades_to_requests() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (company, request) = factory::helpers::create_request_with_company(db).await?;

    let repo = CompanyRepository::new(db);

    assert!(repo.delete(company.id).await?);
    assert!(repo.find_by_id(company.id).await?.is_none());
    assert!(CompanyRequestRepository::new(db)
        .find_by_id(request.id)
        .await?
        .is_none());

    Ok(())
}
