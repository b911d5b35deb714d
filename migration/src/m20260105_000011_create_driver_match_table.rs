use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000006_create_driver_table::Driver,
    m20260105_000010_create_company_request_table::CompanyRequest,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DriverMatch::Table)
                    .if_not_exists()
                    .col(pk_auto(DriverMatch::Id))
                    .col(integer(DriverMatch::DriverId))
                    .col(integer(DriverMatch::CompanyRequestId))
                    .col(string(DriverMatch::Status).default("pending"))
                    .col(boolean(DriverMatch::AutoMatched).default(false))
                    .col(integer_null(DriverMatch::MatchedBy))
                    .col(timestamp_with_time_zone_null(DriverMatch::RespondedAt))
                    .col(
                        timestamp_with_time_zone(DriverMatch::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(DriverMatch::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_match_driver_id")
                            .from(DriverMatch::Table, DriverMatch::DriverId)
                            .to(Driver::Table, Driver::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_match_company_request_id")
                            .from(DriverMatch::Table, DriverMatch::CompanyRequestId)
                            .to(CompanyRequest::Table, CompanyRequest::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_driver_match_status")
                    .table(DriverMatch::Table)
                    .col(DriverMatch::DriverId)
                    .col(DriverMatch::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DriverMatch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DriverMatch {
    Table,
    Id,
    DriverId,
    CompanyRequestId,
    Status,
    AutoMatched,
    MatchedBy,
    RespondedAt,
    CreatedAt,
    UpdatedAt,
}
