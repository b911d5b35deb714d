use super::*;

/// Tests that inactive templates are treated as missing.
///
/// Expected: Ok(Some) for the active key and Ok(None) for the inactive one
#[tokio::test]
async fn ignores_inactive_templates() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_template(db, "match.assigned", "Hi {{name}}").await?;
    factory::notification_template::NotificationTemplateFactory::new(db)
        .key("driver.approved")
        .active(false)
        .build()
        .await?;

    let repo = NotificationTemplateRepository::new(db);

    let active = repo.find_active_by_key("match.assigned").await?.unwrap();
    assert_eq!(active.channel, Channel::Sms);
    assert_eq!(active.body, "Hi {{name}}");
    assert!(repo.find_active_by_key("driver.approved").await?.is_none());
    assert!(repo.key_taken("driver.approved").await?);

    Ok(())
}

/// Tests recording a delivery attempt and reading it back from the log.
///
/// Expected: Ok with one failed entry carrying the error
#[tokio::test]
async fn records_delivery_log() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = NotificationLogRepository::new(db);
    repo.create(CreateNotificationLogParams {
        template_key: "otp.code".to_string(),
        channel: Channel::Sms,
        recipient: "+2348000000001".to_string(),
        body: "Your code is 123456".to_string(),
        status: NotificationStatus::Failed,
        error: Some("gateway timeout".to_string()),
    })
    .await?;

    let page = repo.get_paginated(0, 10).await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].status, NotificationStatus::Failed);
    assert_eq!(page.items[0].error.as_deref(), Some("gateway timeout"));

    Ok(())
}
