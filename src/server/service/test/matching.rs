use super::*;
use crate::{
    model::status::{MatchStatus, RequestStatus},
    server::{
        data::{company_request::CompanyRequestRepository, driver_match::DriverMatchRepository},
        model::driver_match::MatchFilter,
        service::{matching::MatchingService, notification::Notifier},
    },
};
use chrono::{Duration, Utc};
use std::collections::HashSet;
use test_utils::{builder::TestBuilder, factory};

/// Tests that auto-match fills the oldest request first with drivers in id order.
///
/// Expected: the older request gets the two lowest driver ids, the newer one the third,
/// and the last request stays unfilled
#[tokio::test]
async fn auto_match_assigns_first_available_drivers_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let company = factory::create_company(db).await?;
    let older = factory::company_request::CompanyRequestFactory::new(db, company.id)
        .drivers_needed(2)
        .created_at(Utc::now() - Duration::days(2))
        .build()
        .await?;
    let newer = factory::company_request::CompanyRequestFactory::new(db, company.id)
        .drivers_needed(1)
        .created_at(Utc::now() - Duration::days(1))
        .build()
        .await?;
    let newest = factory::company_request::CompanyRequestFactory::new(db, company.id)
        .drivers_needed(1)
        .build()
        .await?;
    let first = factory::create_verified_driver(db).await?;
    let second = factory::create_verified_driver(db).await?;
    let third = factory::create_verified_driver(db).await?;
    factory::create_driver(db).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let summary = MatchingService::new(db, &notifier).auto_match(None).await?;

    assert_eq!(summary.requests_considered, 3);
    assert_eq!(summary.matches_created, 3);
    assert_eq!(summary.unfilled_requests, 1);

    let match_repo = DriverMatchRepository::new(db);
    let mut older_drivers: Vec<i32> = match_repo
        .get_by_request(older.id)
        .await?
        .into_iter()
        .map(|m| m.driver_id)
        .collect();
    older_drivers.sort();
    assert_eq!(older_drivers, vec![first.id, second.id]);

    let newer_matches = match_repo.get_by_request(newer.id).await?;
    assert_eq!(newer_matches.len(), 1);
    assert_eq!(newer_matches[0].driver_id, third.id);
    assert!(newer_matches[0].auto_matched);
    assert_eq!(newer_matches[0].status, MatchStatus::Pending);

    let request_repo = CompanyRequestRepository::new(db);
    for (id, expected) in [
        (older.id, RequestStatus::Matched),
        (newer.id, RequestStatus::Matched),
        (newest.id, RequestStatus::Open),
    ] {
        let request = request_repo.find_by_id(id).await?.unwrap();
        assert_eq!(request.status, expected);
    }

    Ok(())
}

/// Tests that repeated runs never give a driver two active matches.
///
/// Expected: the second run creates nothing and every driver holds at most one match
#[tokio::test]
async fn auto_match_never_double_assigns() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let company = factory::create_company(db).await?;
    for _ in 0..3 {
        factory::company_request::CompanyRequestFactory::new(db, company.id)
            .drivers_needed(2)
            .build()
            .await?;
    }
    for _ in 0..4 {
        factory::create_verified_driver(db).await?;
    }

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let service = MatchingService::new(db, &notifier);

    let first_run = service.auto_match(None).await?;
    let second_run = service.auto_match(None).await?;

    assert_eq!(first_run.matches_created, 4);
    assert_eq!(second_run.matches_created, 0);

    let matches = DriverMatchRepository::new(db).get_all().await?;
    let drivers: HashSet<i32> = matches.iter().map(|m| m.driver_id).collect();
    assert_eq!(drivers.len(), matches.len());

    Ok(())
}

/// Tests manual matching of a driver who already holds an active match.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn manual_match_requires_available_driver() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::create_admin(db).await?;
    let (company, busy_request) = factory::helpers::create_request_with_company(db).await?;
    let request = factory::create_request(db, company.id).await?;
    let driver = factory::create_verified_driver(db).await?;
    factory::create_match(db, driver.id, busy_request.id).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let result = MatchingService::new(db, &notifier)
        .create_manual(admin.id, request.id, driver.id)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests manual matching into a request without free slots.
///
/// Expected: Err(Conflict) once the single slot is taken
#[tokio::test]
async fn manual_match_requires_free_slot() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::create_admin(db).await?;
    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    let first = factory::create_verified_driver(db).await?;
    let second = factory::create_verified_driver(db).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let service = MatchingService::new(db, &notifier);

    let created = service.create_manual(admin.id, request.id, first.id).await?;
    assert_eq!(created.matched_by, Some(admin.id));
    assert!(!created.auto_matched);

    let full = service.create_manual(admin.id, request.id, second.id).await;
    assert!(matches!(full, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests a driver declining a pending match.
///
/// Expected: Ok with status declined, response time set and the request reopened
#[tokio::test]
async fn decline_frees_request_slot() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::create_admin(db).await?;
    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    let driver = factory::create_verified_driver(db).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let service = MatchingService::new(db, &notifier);
    let created = service.create_manual(admin.id, request.id, driver.id).await?;

    let declined = service.respond(driver.id, created.id, false).await?;

    assert_eq!(declined.status, MatchStatus::Declined);
    assert!(declined.responded_at.is_some());
    let request = CompanyRequestRepository::new(db)
        .find_by_id(request.id)
        .await?
        .unwrap();
    assert_eq!(request.status, RequestStatus::Open);

    let again = service.respond(driver.id, created.id, true).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that drivers can only answer their own matches.
///
/// Expected: Err(NotFound) for another driver's match
#[tokio::test]
async fn respond_requires_ownership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    let owner = factory::create_verified_driver(db).await?;
    let other = factory::create_verified_driver(db).await?;
    let driver_match = factory::create_match(db, owner.id, request.id).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let result = MatchingService::new(db, &notifier)
        .respond(other.id, driver_match.id, true)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that only accepted matches can be completed and listing filters by status.
///
/// Expected: Conflict for a pending match; Ok after acceptance
#[tokio::test]
async fn complete_requires_accepted_match() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, request) = factory::helpers::create_request_with_company(db).await?;
    let driver = factory::create_verified_driver(db).await?;
    let driver_match = factory::create_match(db, driver.id, request.id).await?;

    let notifier = Notifier::new(db.clone(), &Providers::log_only());
    let service = MatchingService::new(db, &notifier);

    let too_early = service.complete(driver_match.id).await;
    assert!(matches!(too_early, Err(AppError::Conflict(_))));

    service.respond(driver.id, driver_match.id, true).await?;
    let completed = service.complete(driver_match.id).await?;
    assert_eq!(completed.status, MatchStatus::Completed);

    let page = service
        .get_paginated(
            MatchFilter {
                status: Some(MatchStatus::Completed),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(page.total, 1);

    Ok(())
}
