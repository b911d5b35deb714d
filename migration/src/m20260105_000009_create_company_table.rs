use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(string(Company::Name))
                    .col(string_uniq(Company::Email))
                    .col(string(Company::Phone))
                    .col(string_null(Company::Address))
                    .col(string_null(Company::ContactPerson))
                    .col(boolean(Company::IsActive).default(true))
                    .col(timestamp_with_time_zone(Company::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Company::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Company::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Company {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    ContactPerson,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
