use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000006_create_driver_table::Driver;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DriverVerificationLog::Table)
                    .if_not_exists()
                    .col(pk_auto(DriverVerificationLog::Id))
                    .col(integer(DriverVerificationLog::DriverId))
                    .col(integer_null(DriverVerificationLog::AdminUserId))
                    .col(string(DriverVerificationLog::Action))
                    .col(text_null(DriverVerificationLog::Note))
                    .col(
                        timestamp_with_time_zone(DriverVerificationLog::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_verification_log_driver_id")
                            .from(DriverVerificationLog::Table, DriverVerificationLog::DriverId)
                            .to(Driver::Table, Driver::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DriverVerificationLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DriverVerificationLog {
    Table,
    Id,
    DriverId,
    AdminUserId,
    Action,
    Note,
    CreatedAt,
}
