use super::*;

/// Tests that new companies are active and duplicate emails are detected.
///
/// Expected: Ok with an active company and `email_taken` true
#[tokio::test]
async fn creates_active_company() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CompanyRepository::new(db);
    let company = repo
        .create(CompanyParams {
            name: "Haulage Ltd".to_string(),
            email: "ops@haulage.example".to_string(),
            phone: "+2348011111111".to_string(),
            address: None,
            contact_person: Some("Ngozi".to_string()),
        })
        .await?;

    assert!(company.is_active);
    assert!(repo.email_taken("ops@haulage.example", None).await?);
    assert!(!repo.email_taken("ops@haulage.example", Some(company.id)).await?);

    let deactivated = repo.set_active(company.id, false).await?.unwrap();
    assert!(!deactivated.is_active);

    Ok(())
}
