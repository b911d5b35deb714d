//! Service layer for business logic and orchestration.
//!
//! This module sits between the controller (API) layer and the data (repository) layer.
//! Services are responsible for:
//!
//! - **Business Logic**: Enforcing workflow rules, role levels and validation
//! - **Orchestration**: Coordinating repositories, providers and notifications
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Wrapping multi-statement updates in a transaction

pub mod admin_user;
pub mod auth;
pub mod company;
pub mod company_request;
pub mod driver;
pub mod driver_portal;
pub mod export;
pub mod kyc;
pub mod matching;
pub mod notification;
pub mod otp;
pub mod payment;
pub mod permission_cache;
pub mod provider;
pub mod role;
pub mod setup_code;
pub mod stats;
pub mod verification;

#[cfg(test)]
mod test;
