use super::*;

/// Tests stamping phone and email verification by identifier.
///
/// Expected: Ok(1) for each known identifier and Ok(0) for an unknown one
#[tokio::test]
async fn stamps_matching_contact() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let driver = factory::driver::DriverFactory::new(db)
        .phone_verified(false)
        .build()
        .await?;

    let repo = DriverRepository::new(db);
    let now = Utc::now();

    assert_eq!(
        repo.mark_contact_verified(&driver.phone, OtpPurpose::PhoneVerification, now)
            .await?,
        1
    );
    assert_eq!(
        repo.mark_contact_verified(&driver.email, OtpPurpose::EmailVerification, now)
            .await?,
        1
    );
    assert_eq!(
        repo.mark_contact_verified("+10000000", OtpPurpose::PhoneVerification, now)
            .await?,
        0
    );

    let stored = repo.find_by_id(driver.id).await?.unwrap();
    assert!(stored.phone_verified_at.is_some());
    assert!(stored.email_verified_at.is_some());

    Ok(())
}
