use super::*;

/// Tests that the newest pending code is returned and invalidation removes it.
///
/// Expected: Ok with the newer of two pending codes, then None after invalidation
#[tokio::test]
async fn returns_newest_unverified_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(OtpVerification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OtpRepository::new(db);
    repo.create(params("+2348000000001", Duration::minutes(10)))
        .await?;
    let newest = repo
        .create(params("+2348000000001", Duration::minutes(10)))
        .await?;

    let found = repo
        .find_latest_pending("+2348000000001", OtpPurpose::PhoneVerification)
        .await?
        .unwrap();
    assert_eq!(found.id, newest.id);
    assert_eq!(found.attempts, 0);

    repo.invalidate_pending("+2348000000001", OtpPurpose::PhoneVerification)
        .await?;
    assert!(repo
        .find_latest_pending("+2348000000001", OtpPurpose::PhoneVerification)
        .await?
        .is_none());

    Ok(())
}

/// Tests that marking a code verified removes it from the pending lookup.
///
/// Expected: Ok(None) after verification
#[tokio::test]
async fn verified_code_is_not_pending() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(OtpVerification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OtpRepository::new(db);
    let record = repo
        .create(params("+2348000000002", Duration::minutes(10)))
        .await?;
    repo.set_attempts(record.id, 2).await?;
    repo.mark_verified(record.id, Utc::now()).await?;

    assert!(repo
        .find_latest_pending("+2348000000002", OtpPurpose::PhoneVerification)
        .await?
        .is_none());

    Ok(())
}
