use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtpVerification::Table)
                    .if_not_exists()
                    .col(pk_auto(OtpVerification::Id))
                    .col(string(OtpVerification::Identifier))
                    .col(string(OtpVerification::Channel))
                    .col(string(OtpVerification::Purpose))
                    .col(string(OtpVerification::CodeHash))
                    .col(integer(OtpVerification::Attempts).default(0))
                    .col(timestamp_with_time_zone(OtpVerification::ExpiresAt))
                    .col(timestamp_with_time_zone_null(OtpVerification::VerifiedAt))
                    .col(
                        timestamp_with_time_zone(OtpVerification::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_otp_identifier_purpose")
                    .table(OtpVerification::Table)
                    .col(OtpVerification::Identifier)
                    .col(OtpVerification::Purpose)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OtpVerification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OtpVerification {
    Table,
    Id,
    Identifier,
    Channel,
    Purpose,
    CodeHash,
    Attempts,
    ExpiresAt,
    VerifiedAt,
    CreatedAt,
}
