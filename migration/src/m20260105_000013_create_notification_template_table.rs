use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationTemplate::Table)
                    .if_not_exists()
                    .col(pk_auto(NotificationTemplate::Id))
                    .col(string_uniq(NotificationTemplate::Key))
                    .col(string(NotificationTemplate::Channel))
                    .col(string_null(NotificationTemplate::Subject))
                    .col(text(NotificationTemplate::Body))
                    .col(boolean(NotificationTemplate::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(NotificationTemplate::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(NotificationTemplate::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationTemplate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum NotificationTemplate {
    Table,
    Id,
    Key,
    Channel,
    Subject,
    Body,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
