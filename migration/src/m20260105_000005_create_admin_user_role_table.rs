use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_admin_user_table::AdminUser, m20260105_000002_create_role_table::Role,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminUserRole::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminUserRole::Id))
                    .col(integer(AdminUserRole::AdminUserId))
                    .col(integer(AdminUserRole::RoleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_user_role_admin_user_id")
                            .from(AdminUserRole::Table, AdminUserRole::AdminUserId)
                            .to(AdminUser::Table, AdminUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_user_role_role_id")
                            .from(AdminUserRole::Table, AdminUserRole::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_admin_user_role_unique")
                            .col(AdminUserRole::AdminUserId)
                            .col(AdminUserRole::RoleId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminUserRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AdminUserRole {
    Table,
    Id,
    AdminUserId,
    RoleId,
}
