//! SeaORM entity definitions for the fleetbroker database schema.

pub mod prelude;

pub mod admin_user;
pub mod admin_user_role;
pub mod company;
pub mod company_request;
pub mod driver;
pub mod driver_document;
pub mod driver_match;
pub mod driver_verification_log;
pub mod notification_log;
pub mod notification_template;
pub mod otp_verification;
pub mod payment_transaction;
pub mod permission;
pub mod role;
pub mod role_permission;
