use sea_orm_migration::prelude::*;

use super::m20260105_000013_create_notification_template_table::NotificationTemplate;

/// (key, channel, subject, body)
const TEMPLATES: &[(&str, &str, Option<&str>, &str)] = &[
    (
        "otp.code",
        "sms",
        None,
        "Your verification code is {{code}}. It expires in {{minutes}} minutes.",
    ),
    (
        "otp.code.email",
        "email",
        Some("Your verification code"),
        "Hello {{name}},\n\nYour verification code is {{code}}. It expires in {{minutes}} minutes.",
    ),
    (
        "driver.approved",
        "sms",
        None,
        "Hi {{name}}, your driver account has been verified. You can now receive job requests.",
    ),
    (
        "driver.rejected",
        "sms",
        None,
        "Hi {{name}}, your verification was not approved: {{reason}}. Please resubmit your KYC details.",
    ),
    (
        "match.assigned",
        "sms",
        None,
        "Hi {{name}}, you have been matched to \"{{request_title}}\" in {{location}}. Open the driver portal to respond.",
    ),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(NotificationTemplate::Table).columns([
            NotificationTemplate::Key,
            NotificationTemplate::Channel,
            NotificationTemplate::Subject,
            NotificationTemplate::Body,
            NotificationTemplate::IsActive,
        ]);
        for (key, channel, subject, body) in TEMPLATES {
            insert.values_panic([
                (*key).into(),
                (*channel).into(),
                subject.map(|s| s.to_string()).into(),
                (*body).into(),
                true.into(),
            ]);
        }
        manager.exec_stmt(insert.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM notification_template")
            .await?;
        Ok(())
    }
}
