use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Driver::Table)
                    .if_not_exists()
                    .col(pk_auto(Driver::Id))
                    .col(string(Driver::FirstName))
                    .col(string(Driver::LastName))
                    .col(string_uniq(Driver::Email))
                    .col(string_uniq(Driver::Phone))
                    .col(string_null(Driver::PasswordHash))
                    .col(string(Driver::Status).default("active"))
                    .col(string(Driver::VerificationStatus).default("unverified"))
                    .col(integer(Driver::KycStep).default(0))
                    .col(date_null(Driver::DateOfBirth))
                    .col(string_null(Driver::Address))
                    .col(string_null(Driver::City))
                    .col(string_null(Driver::NationalIdNumber))
                    .col(string_null(Driver::LicenseNumber))
                    .col(date_null(Driver::LicenseExpiry))
                    .col(string_null(Driver::VehicleType))
                    .col(string_null(Driver::VehiclePlate))
                    .col(timestamp_with_time_zone_null(Driver::KycSubmittedAt))
                    .col(string_null(Driver::RejectionReason))
                    .col(timestamp_with_time_zone_null(Driver::VerifiedAt))
                    .col(integer_null(Driver::VerifiedBy))
                    .col(timestamp_with_time_zone_null(Driver::PhoneVerifiedAt))
                    .col(timestamp_with_time_zone_null(Driver::EmailVerifiedAt))
                    .col(timestamp_with_time_zone(Driver::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Driver::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_driver_verification_status")
                    .table(Driver::Table)
                    .col(Driver::VerificationStatus)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Driver::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Driver {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    PasswordHash,
    Status,
    VerificationStatus,
    KycStep,
    DateOfBirth,
    Address,
    City,
    NationalIdNumber,
    LicenseNumber,
    LicenseExpiry,
    VehicleType,
    VehiclePlate,
    KycSubmittedAt,
    RejectionReason,
    VerifiedAt,
    VerifiedBy,
    PhoneVerifiedAt,
    EmailVerifiedAt,
    CreatedAt,
    UpdatedAt,
}
