use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000009_create_company_table::Company;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(CompanyRequest::Id))
                    .col(integer(CompanyRequest::CompanyId))
                    .col(string(CompanyRequest::Title))
                    .col(text_null(CompanyRequest::Description))
                    .col(string(CompanyRequest::Location))
                    .col(string_null(CompanyRequest::VehicleType))
                    .col(integer(CompanyRequest::DriversNeeded).default(1))
                    .col(string(CompanyRequest::Status).default("open"))
                    .col(timestamp_with_time_zone_null(CompanyRequest::StartDate))
                    .col(
                        timestamp_with_time_zone(CompanyRequest::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(CompanyRequest::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_request_company_id")
                            .from(CompanyRequest::Table, CompanyRequest::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompanyRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CompanyRequest {
    Table,
    Id,
    CompanyId,
    Title,
    Description,
    Location,
    VehicleType,
    DriversNeeded,
    Status,
    StartDate,
    CreatedAt,
    UpdatedAt,
}
