//! Database repository layer for all domain entities.
//!
//! Each repository wraps a borrowed connection and converts SeaORM entity models into
//! domain models at the boundary. Repositories are generic over `ConnectionTrait` so
//! services can run several of them inside one `DatabaseTransaction`.

pub mod admin_user;
pub mod company;
pub mod company_request;
pub mod driver;
pub mod driver_document;
pub mod driver_match;
pub mod notification_log;
pub mod notification_template;
pub mod otp;
pub mod payment;
pub mod permission;
pub mod role;
pub mod stats;
pub mod verification_log;

#[cfg(test)]
mod test;
