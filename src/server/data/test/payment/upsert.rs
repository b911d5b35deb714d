use super::*;

fn event(provider: PaymentProvider, reference: &str, status: PaymentStatus) -> PaymentEvent {
    PaymentEvent {
        provider,
        reference: reference.to_string(),
        event_type: "charge".to_string(),
        status,
        amount_minor: 500_000,
        currency: "NGN".to_string(),
        company_id: None,
        payload: "{}".to_string(),
    }
}

/// Tests that a second event for the same provider and reference updates the row.
///
/// Expected: Ok with one transaction whose status moved to succeeded
#[tokio::test]
async fn updates_existing_reference() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(PaymentTransaction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PaymentRepository::new(db);
    let first = repo
        .upsert(event(PaymentProvider::Paystack, "ref-1", PaymentStatus::Pending))
        .await?;
    let second = repo
        .upsert(event(
            PaymentProvider::Paystack,
            "ref-1",
            PaymentStatus::Succeeded,
        ))
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.status, PaymentStatus::Succeeded);
    assert_eq!(second.created_at, first.created_at);

    let page = repo.get_paginated(&PaymentFilter::default(), 0, 10).await?;
    assert_eq!(page.total, 1);

    Ok(())
}

/// Tests that the same reference from another provider is a separate transaction.
///
/// Expected: Ok with two rows and one per provider filter
#[tokio::test]
async fn keeps_providers_apart() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(PaymentTransaction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PaymentRepository::new(db);
    repo.upsert(event(PaymentProvider::Paystack, "shared", PaymentStatus::Succeeded))
        .await?;
    repo.upsert(event(PaymentProvider::Stripe, "shared", PaymentStatus::Failed))
        .await?;

    let all = repo.get_paginated(&PaymentFilter::default(), 0, 10).await?;
    let stripe = repo
        .get_paginated(
            &PaymentFilter {
                provider: Some(PaymentProvider::Stripe),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(all.total, 2);
    assert_eq!(stripe.total, 1);
    assert_eq!(stripe.items[0].status, PaymentStatus::Failed);

    Ok(())
}

/// Tests that a late pending or failed event cannot undo a success.
///
/// Expected: Ok with the transaction still succeeded and its amount unchanged
#[tokio::test]
async fn keeps_succeeded_status_on_late_events() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(PaymentTransaction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PaymentRepository::new(db);
    let succeeded = repo
        .upsert(event(PaymentProvider::Paystack, "ref-2", PaymentStatus::Succeeded))
        .await?;
    let late_pending = repo
        .upsert(PaymentEvent {
            amount_minor: 1,
            ..event(PaymentProvider::Paystack, "ref-2", PaymentStatus::Pending)
        })
        .await?;
    let late_failed = repo
        .upsert(event(PaymentProvider::Paystack, "ref-2", PaymentStatus::Failed))
        .await?;

    assert_eq!(late_pending.id, succeeded.id);
    assert_eq!(late_pending.status, PaymentStatus::Succeeded);
    assert_eq!(late_pending.amount_minor, 500_000);
    assert_eq!(late_failed.status, PaymentStatus::Succeeded);

    Ok(())
}
