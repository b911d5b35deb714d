use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationLog::Table)
                    .if_not_exists()
                    .col(pk_auto(NotificationLog::Id))
                    .col(string(NotificationLog::TemplateKey))
                    .col(string(NotificationLog::Channel))
                    .col(string(NotificationLog::Recipient))
                    .col(text(NotificationLog::Body))
                    .col(string(NotificationLog::Status))
                    .col(text_null(NotificationLog::Error))
                    .col(
                        timestamp_with_time_zone(NotificationLog::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum NotificationLog {
    Table,
    Id,
    TemplateKey,
    Channel,
    Recipient,
    Body,
    Status,
    Error,
    CreatedAt,
}
