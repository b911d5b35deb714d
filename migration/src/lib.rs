pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_admin_user_table;
mod m20260105_000002_create_role_table;
mod m20260105_000003_create_permission_table;
mod m20260105_000004_create_role_permission_table;
mod m20260105_000005_create_admin_user_role_table;
mod m20260105_000006_create_driver_table;
mod m20260105_000007_create_driver_document_table;
mod m20260105_000008_create_driver_verification_log_table;
mod m20260105_000009_create_company_table;
mod m20260105_000010_create_company_request_table;
mod m20260105_000011_create_driver_match_table;
mod m20260105_000012_create_otp_verification_table;
mod m20260105_000013_create_notification_template_table;
mod m20260105_000014_create_notification_log_table;
mod m20260105_000015_create_payment_transaction_table;
mod m20260106_000016_seed_access_control;
mod m20260106_000017_seed_notification_templates;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_admin_user_table::Migration),
            Box::new(m20260105_000002_create_role_table::Migration),
            Box::new(m20260105_000003_create_permission_table::Migration),
            Box::new(m20260105_000004_create_role_permission_table::Migration),
            Box::new(m20260105_000005_create_admin_user_role_table::Migration),
            Box::new(m20260105_000006_create_driver_table::Migration),
            Box::new(m20260105_000007_create_driver_document_table::Migration),
            Box::new(m20260105_000008_create_driver_verification_log_table::Migration),
            Box::new(m20260105_000009_create_company_table::Migration),
            Box::new(m20260105_000010_create_company_request_table::Migration),
            Box::new(m20260105_000011_create_driver_match_table::Migration),
            Box::new(m20260105_000012_create_otp_verification_table::Migration),
            Box::new(m20260105_000013_create_notification_template_table::Migration),
            Box::new(m20260105_000014_create_notification_log_table::Migration),
            Box::new(m20260105_000015_create_payment_transaction_table::Migration),
            Box::new(m20260106_000016_seed_access_control::Migration),
            Box::new(m20260106_000017_seed_notification_templates::Migration),
        ]
    }
}
