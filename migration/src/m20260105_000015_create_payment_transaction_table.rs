use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(PaymentTransaction::Id))
                    .col(string(PaymentTransaction::Provider))
                    .col(string(PaymentTransaction::Reference))
                    .col(string(PaymentTransaction::EventType))
                    .col(string(PaymentTransaction::Status))
                    .col(big_integer(PaymentTransaction::AmountMinor))
                    .col(string(PaymentTransaction::Currency))
                    .col(integer_null(PaymentTransaction::CompanyId))
                    .col(text(PaymentTransaction::Payload))
                    .col(
                        timestamp_with_time_zone(PaymentTransaction::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(PaymentTransaction::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_payment_provider_reference")
                            .col(PaymentTransaction::Provider)
                            .col(PaymentTransaction::Reference),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentTransaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PaymentTransaction {
    Table,
    Id,
    Provider,
    Reference,
    EventType,
    Status,
    AmountMinor,
    Currency,
    CompanyId,
    Payload,
    CreatedAt,
    UpdatedAt,
}
