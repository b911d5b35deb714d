use super::*;

fn params(email: &str, phone: &str) -> CreateDriverParams {
    CreateDriverParams {
        first_name: "Tunde".to_string(),
        last_name: "Bello".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        password_hash: None,
        city: Some("Abuja".to_string()),
    }
}

/// Tests that a new driver starts active, unverified and at KYC step 0.
///
/// Expected: Ok with initial statuses set
#[tokio::test]
async fn creates_driver_with_initial_state() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DriverRepository::new(db);
    let driver = repo
        .create(params("tunde@example.com", "+2348000000001"))
        .await?;

    assert_eq!(driver.status, DriverStatus::Active);
    assert_eq!(driver.verification_status, VerificationStatus::Unverified);
    assert_eq!(driver.kyc_step, 0);
    assert_eq!(driver.city.as_deref(), Some("Abuja"));
    assert!(driver.phone_verified_at.is_none());

    Ok(())
}

/// Tests detecting a taken phone number.
///
/// Expected: Ok(Some("phone")) for a new email with an existing phone
#[tokio::test]
async fn detects_phone_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_driver(db).await?;

    let repo = DriverRepository::new(db);
    let conflict = repo
        .find_contact_conflict("fresh@example.com", &existing.phone, None)
        .await?;
    let own = repo
        .find_contact_conflict(&existing.email, &existing.phone, Some(existing.id))
        .await?;

    assert_eq!(conflict, Some("phone"));
    assert_eq!(own, None);

    Ok(())
}

/// Tests that a stored status outside the known set surfaces as an internal error.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn fails_on_unknown_stored_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let driver = factory::driver::DriverFactory::new(db)
        .status("archived")
        .build()
        .await?;

    let repo = DriverRepository::new(db);
    let result = repo.find_by_id(driver.id).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
