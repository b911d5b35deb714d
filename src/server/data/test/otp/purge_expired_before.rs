use super::*;

/// Tests purging codes that expired before the cutoff.
///
/// Expected: Ok(1) with the live code kept
#[tokio::test]
async fn deletes_only_expired_codes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(OtpVerification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OtpRepository::new(db);
    repo.create(params("+2348000000003", -Duration::hours(3)))
        .await?;
    let live = repo
        .create(params("+2348000000004", Duration::minutes(10)))
        .await?;

    let purged = repo
        .purge_expired_before(Utc::now() - Duration::hours(1))
        .await?;

    assert_eq!(purged, 1);
    let remaining = repo
        .find_latest_pending("+2348000000004", OtpPurpose::PhoneVerification)
        .await?
        .unwrap();
    assert_eq!(remaining.id, live.id);

    Ok(())
}
