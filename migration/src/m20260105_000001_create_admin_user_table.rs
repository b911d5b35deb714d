use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminUser::Id))
                    .col(string(AdminUser::Name))
                    .col(string_uniq(AdminUser::Email))
                    .col(string(AdminUser::PasswordHash))
                    .col(boolean(AdminUser::IsActive).default(true))
                    .col(timestamp_with_time_zone_null(AdminUser::LastLoginAt))
                    .col(
                        timestamp_with_time_zone(AdminUser::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(AdminUser::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AdminUser {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    IsActive,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}
