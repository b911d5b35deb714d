//! Domain models and operation parameters.
//!
//! Domain models are produced by repositories from entity models (`from_entity`) and turned
//! into DTOs by controllers (`into_dto`). Parameter structs carry validated input from
//! controllers into services and repositories.

pub mod admin;
pub mod company;
pub mod company_request;
pub mod driver;
pub mod driver_match;
pub mod notification;
pub mod otp;
pub mod page;
pub mod payment;
pub mod role;
pub mod stats;
