use super::*;

/// Tests that rejection stores the reason and resets KYC to step 0.
///
/// Expected: Ok with status rejected, step 0 and verification metadata cleared
#[tokio::test]
async fn stores_reason_and_resets_step() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let driver = factory::create_verified_driver(db).await?;

    let repo = DriverRepository::new(db);
    let rejected = repo
        .reject(driver.id, "Blurry licence photo".to_string())
        .await?
        .unwrap();

    assert_eq!(rejected.verification_status, VerificationStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Blurry licence photo"));
    assert_eq!(rejected.kyc_step, 0);
    assert!(rejected.verified_at.is_none());
    assert!(rejected.verified_by.is_none());

    Ok(())
}

/// Tests that a later submission clears the previous rejection reason.
///
/// Expected: Ok with status pending, step 3 and no reason
#[tokio::test]
async fn resubmission_clears_reason() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let driver = factory::create_verified_driver(db).await?;
    let repo = DriverRepository::new(db);
    repo.reject(driver.id, "Expired licence".to_string()).await?;

    let submitted = repo
        .mark_kyc_submitted(driver.id, Utc::now())
        .await?
        .unwrap();

    assert_eq!(submitted.verification_status, VerificationStatus::Pending);
    assert_eq!(submitted.kyc_step, 3);
    assert!(submitted.rejection_reason.is_none());
    assert!(submitted.kyc_submitted_at.is_some());

    Ok(())
}
