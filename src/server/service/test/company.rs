use super::*;
use crate::server::{
    model::company::{CompanyFilter, CompanyParams},
    service::company::CompanyService,
};
use test_utils::{builder::TestBuilder, factory};

fn params(email: &str) -> CompanyParams {
    CompanyParams {
        name: "  Lagos Logistics ".to_string(),
        email: email.to_string(),
        phone: "+234 801-000-0000".to_string(),
        address: Some("  ".to_string()),
        contact_person: Some("Tunde".to_string()),
    }
}

/// Tests creating a company with messy input.
///
/// Expected: Ok with trimmed name, normalized email and phone, blank address dropped
#[tokio::test]
async fn creates_normalized_company() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let company = CompanyService::new(db)
        .create(params("Ops@LagosLogistics.com"))
        .await?;

    assert_eq!(company.name, "Lagos Logistics");
    assert_eq!(company.email, "ops@lagoslogistics.com");
    assert_eq!(company.phone, "+2348010000000");
    assert_eq!(company.address, None);
    assert!(company.is_active);

    Ok(())
}

/// Tests creating a second company with an existing email.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = CompanyService::new(db);

    service.create(params("ops@example.com")).await?;
    let result = service.create(params("OPS@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests the company detail counters.
///
/// Expected: all requests counted, only open and partially matched ones as open
#[tokio::test]
async fn detail_counts_open_requests() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let company = factory::create_company(db).await?;
    for status in ["open", "partially_matched", "matched", "completed"] {
        factory::company_request::CompanyRequestFactory::new(db, company.id)
            .status(status)
            .build()
            .await?;
    }

    let detail = CompanyService::new(db).get(company.id).await?;

    assert_eq!(detail.request_count, 4);
    assert_eq!(detail.open_request_count, 2);

    Ok(())
}

/// Tests toggling and filtering by the active flag.
///
/// Expected: toggled company listed only under inactive
#[tokio::test]
async fn toggle_active_flips_flag() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let company = factory::create_company(db).await?;
    factory::create_company(db).await?;
    let service = CompanyService::new(db);

    let toggled = service.toggle_active(company.id).await?;
    assert!(!toggled.is_active);

    let inactive = service
        .get_paginated(
            CompanyFilter {
                is_active: Some(false),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(inactive.total, 1);
    assert_eq!(inactive.items[0].id, company.id);

    Ok(())
}

/// Tests deleting an unknown company.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn delete_unknown_company_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_matching_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CompanyService::new(db).delete(404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
