use super::*;
use crate::{
    model::status::{MatchStatus, RequestStatus, VerificationAction, VerificationStatus},
    server::{
        data::{
            company_request::CompanyRequestRepository, driver_match::DriverMatchRepository,
            verification_log::VerificationLogRepository,
        },
        error::auth::AuthError,
        model::admin::AdminUser,
        service::{notification::Notifier, verification::VerificationService},
        util::password::hash_password,
    },
};
use test_utils::{builder::TestBuilder, factory};

async fn reviewer(db: &DatabaseConnection) -> Result<AdminUser, AppError> {
    let admin = factory::admin_user::AdminUserFactory::new(db)
        .password_hash(hash_password("reviewer-pass")?)
        .build()
        .await?;

    Ok(AdminUser::from_entity(admin))
}

/// Tests rejecting a verified driver with active matches.
///
/// Expected: Ok, status rejected with the reason stored, KYC reset, matches cancelled,
/// request reopened and the rejection logged
#[tokio::test]
async fn reject_records_reason_and_cancels_matches() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = reviewer(db).await?;
    let driver = factory::create_verified_driver(db).await?;
    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    let driver_match = factory::driver_match::DriverMatchFactory::new(db, driver.id, request.id)
        .status("accepted")
        .build()
        .await?;
    CompanyRequestRepository::new(db)
        .set_status(request.id, RequestStatus::Matched)
        .await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let rejected = VerificationService::new(db, &notifier)
        .reject(
            &admin,
            driver.id,
            "reviewer-pass",
            " Licence photo unreadable ".to_string(),
        )
        .await?;

    assert_eq!(rejected.verification_status, VerificationStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Licence photo unreadable")
    );
    assert_eq!(rejected.kyc_step, 0);

    let driver_match = DriverMatchRepository::new(db)
        .find_by_id(driver_match.id)
        .await?
        .unwrap();
    assert_eq!(driver_match.status, MatchStatus::Cancelled);

    let request = CompanyRequestRepository::new(db)
        .find_by_id(request.id)
        .await?
        .unwrap();
    assert_eq!(request.status, RequestStatus::Open);

    let log = VerificationLogRepository::new(db)
        .get_by_driver(driver.id)
        .await?;
    let last = log.last().unwrap();
    assert_eq!(last.action, VerificationAction::Rejected);
    assert_eq!(last.admin_user_id, Some(admin.id));
    assert_eq!(last.note.as_deref(), Some("Licence photo unreadable"));

    Ok(())
}

/// Tests that a wrong confirmation password blocks the decision.
///
/// Expected: Err(PasswordConfirmationFailed) and the driver unchanged
#[tokio::test]
async fn reject_requires_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = reviewer(db).await?;
    let driver = factory::create_verified_driver(db).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let result = VerificationService::new(db, &notifier)
        .reject(&admin, driver.id, "guess", "Fraud".to_string())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::PasswordConfirmationFailed(_)))
    ));

    Ok(())
}

/// Tests that a reason is required to reject.
///
/// Expected: Err(Validation)
#[tokio::test]
async fn reject_requires_reason() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = reviewer(db).await?;
    let driver = factory::create_verified_driver(db).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let result = VerificationService::new(db, &notifier)
        .reject(&admin, driver.id, "reviewer-pass", "   ".to_string())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests approving a pending driver.
///
/// Expected: Ok with status verified and the approver recorded
#[tokio::test]
async fn approves_pending_driver() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = reviewer(db).await?;
    let driver = factory::driver::DriverFactory::new(db)
        .with_kyc_details()
        .kyc_step(3)
        .verification_status("pending")
        .build()
        .await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let approved = VerificationService::new(db, &notifier)
        .approve(&admin, driver.id, "reviewer-pass")
        .await?;

    assert_eq!(approved.verification_status, VerificationStatus::Verified);
    assert_eq!(approved.verified_by, Some(admin.id));
    assert!(approved.verified_at.is_some());

    Ok(())
}

/// Tests that only pending drivers can be approved.
///
/// Expected: Err(Conflict) for an unverified driver
#[tokio::test]
async fn approve_requires_pending() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = reviewer(db).await?;
    let driver = factory::create_driver(db).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let result = VerificationService::new(db, &notifier)
        .approve(&admin, driver.id, "reviewer-pass")
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
