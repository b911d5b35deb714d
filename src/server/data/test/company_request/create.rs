use super::*;

/// Tests that new requests start open and are counted for their company.
///
/// Expected: Ok with status open and counts of 1
#[tokio::test]
async fn creates_open_request() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let company = factory::create_company(db).await?;

    let repo = CompanyRequestRepository::new(db);
    let request = repo
        .create(CreateCompanyRequestParams {
            company_id: company.id,
            title: "Night shift drivers".to_string(),
            description: None,
            location: "Ikeja".to_string(),
            vehicle_type: Some("van".to_string()),
            drivers_needed: 3,
            start_date: None,
        })
        .await?;

    assert_eq!(request.status, RequestStatus::Open);
    assert_eq!(request.drivers_needed, 3);
    assert_eq!(repo.count_for_company(company.id, None).await?, 1);
    assert_eq!(
        repo.count_for_company(company.id, Some(&[RequestStatus::Open]))
            .await?,
        1
    );

    let page = repo
        .get_paginated(
            &CompanyRequestFilter {
                company_id: Some(company.id),
                status: Some(RequestStatus::Matched),
            },
            0,
            10,
        )
        .await?;
    assert_eq!(page.total, 0);

    Ok(())
}
