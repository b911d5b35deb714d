use sea_orm_migration::prelude::*;

use super::{
    m20260105_000002_create_role_table::Role,
    m20260105_000003_create_permission_table::Permission,
};

const PERMISSIONS: &[(&str, &str)] = &[
    ("dashboard.view", "View dashboard statistics"),
    ("drivers.view", "View drivers and their KYC details"),
    ("drivers.manage", "Create, edit, delete and bulk-update drivers"),
    ("drivers.verify", "Approve or reject driver verification"),
    ("companies.view", "View companies"),
    ("companies.manage", "Create, edit and delete companies"),
    ("requests.view", "View company job requests"),
    ("requests.manage", "Create, edit, cancel and complete job requests"),
    ("matches.view", "View driver matches"),
    ("matches.manage", "Create, cancel and complete driver matches"),
    ("roles.manage", "Manage roles and their permissions"),
    ("admins.manage", "Manage administrator accounts"),
    ("notifications.manage", "Manage notification templates"),
    ("integrations.view", "View third-party integration status"),
    ("payments.view", "View payment transactions"),
    ("reports.export", "Export CSV reports"),
];

/// (name, description, level)
const ROLES: &[(&str, &str, i32)] = &[
    ("Super Admin", "Full access to every area of the back-office", 100),
    ("Admin", "Day-to-day operations without access management", 50),
    ("Verifier", "Reviews driver KYC submissions", 10),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Permission::Table)
            .columns([Permission::Key, Permission::Description]);
        for (key, description) in PERMISSIONS {
            insert.values_panic([(*key).into(), (*description).into()]);
        }
        manager.exec_stmt(insert.to_owned()).await?;

        let mut insert = Query::insert();
        insert
            .into_table(Role::Table)
            .columns([Role::Name, Role::Description, Role::Level, Role::IsActive]);
        for (name, description, level) in ROLES {
            insert.values_panic([
                (*name).into(),
                (*description).into(),
                (*level).into(),
                true.into(),
            ]);
        }
        manager.exec_stmt(insert.to_owned()).await?;

        let db = manager.get_connection();
        db.execute_unprepared(
            "INSERT INTO role_permission (role_id, permission_id) \
             SELECT r.id, p.id FROM role r, permission p WHERE r.name = 'Super Admin'",
        )
        .await?;
        db.execute_unprepared(
            "INSERT INTO role_permission (role_id, permission_id) \
             SELECT r.id, p.id FROM role r, permission p \
             WHERE r.name = 'Admin' AND p.key NOT IN ('roles.manage', 'admins.manage')",
        )
        .await?;
        db.execute_unprepared(
            "INSERT INTO role_permission (role_id, permission_id) \
             SELECT r.id, p.id FROM role r, permission p \
             WHERE r.name = 'Verifier' \
             AND p.key IN ('dashboard.view', 'drivers.view', 'drivers.verify')",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DELETE FROM role_permission").await?;
        db.execute_unprepared("DELETE FROM role").await?;
        db.execute_unprepared("DELETE FROM permission").await?;
        Ok(())
    }
}
