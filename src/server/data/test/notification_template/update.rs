use super::*;

/// Tests that updating a template keeps its key.
///
/// Expected: Ok with the new body and channel and the original key
#[tokio::test]
async fn keeps_key_on_update() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let template = factory::create_template(db, "driver.rejected", "Sorry").await?;

    let repo = NotificationTemplateRepository::new(db);
    let updated = repo
        .update(
            template.id,
            NotificationTemplateParams {
                key: "ignored.key".to_string(),
                channel: Channel::Email,
                subject: Some("Verification result".to_string()),
                body: "Reason: {{reason}}".to_string(),
                is_active: true,
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.key, "driver.rejected");
    assert_eq!(updated.channel, Channel::Email);
    assert_eq!(updated.body, "Reason: {{reason}}");

    Ok(())
}
