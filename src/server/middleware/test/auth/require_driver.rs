use super::*;

/// Tests a logged-in, active driver.
///
/// Expected: Ok(Driver)
#[tokio::test]
async fn grants_access_to_driver() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let driver = factory::create_driver(db).await?;

    DriverSession::new(session).set_driver_id(driver.id).await?;

    let current = DriverGuard::new(db, session).require().await?;

    assert_eq!(current.id, driver.id);
    assert_eq!(current.status, DriverStatus::Active);

    Ok(())
}

/// Tests that an admin login does not authenticate the driver portal.
///
/// Expected: Err(AuthError::NotLoggedIn)
#[tokio::test]
async fn admin_session_is_not_a_driver_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let driver = factory::create_driver(db).await?;

    AdminSession::new(session).set_admin_id(driver.id).await?;

    let result = DriverGuard::new(db, session).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotLoggedIn))
    ));

    Ok(())
}

/// Tests a suspended driver with a live session.
///
/// Expected: Err(AuthError::AccountInactive)
#[tokio::test]
async fn rejects_suspended_driver() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let driver = factory::driver::DriverFactory::new(db)
        .status("suspended")
        .build()
        .await?;

    DriverSession::new(session).set_driver_id(driver.id).await?;

    let result = DriverGuard::new(db, session).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive(_)))
    ));

    Ok(())
}

/// Tests an inactive (not suspended) driver.
///
/// Expected: Ok(Driver), inactive drivers can still use the portal
#[tokio::test]
async fn inactive_driver_keeps_portal_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_driver_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let driver = factory::driver::DriverFactory::new(db)
        .status("inactive")
        .build()
        .await?;

    DriverSession::new(session).set_driver_id(driver.id).await?;

    let current = DriverGuard::new(db, session).require().await?;

    assert_eq!(current.status, DriverStatus::Inactive);

    Ok(())
}
