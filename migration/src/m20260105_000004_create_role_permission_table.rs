use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000002_create_role_table::Role,
    m20260105_000003_create_permission_table::Permission,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RolePermission::Table)
                    .if_not_exists()
                    .col(pk_auto(RolePermission::Id))
                    .col(integer(RolePermission::RoleId))
                    .col(integer(RolePermission::PermissionId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_permission_role_id")
                            .from(RolePermission::Table, RolePermission::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_permission_permission_id")
                            .from(RolePermission::Table, RolePermission::PermissionId)
                            .to(Permission::Table, Permission::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_role_permission_unique")
                            .col(RolePermission::RoleId)
                            .col(RolePermission::PermissionId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RolePermission::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RolePermission {
    Table,
    Id,
    RoleId,
    PermissionId,
}
