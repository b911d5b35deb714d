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
                    .table(DriverDocument::Table)
                    .if_not_exists()
                    .col(pk_auto(DriverDocument::Id))
                    .col(integer(DriverDocument::DriverId))
                    .col(string(DriverDocument::DocumentType))
                    .col(string(DriverDocument::FilePath))
                    .col(string(DriverDocument::OriginalName))
                    .col(text_null(DriverDocument::OcrText))
                    .col(
                        timestamp_with_time_zone(DriverDocument::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_document_driver_id")
                            .from(DriverDocument::Table, DriverDocument::DriverId)
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
            .drop_table(Table::drop().table(DriverDocument::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DriverDocument {
    Table,
    Id,
    DriverId,
    DocumentType,
    FilePath,
    OriginalName,
    OcrText,
    CreatedAt,
}
