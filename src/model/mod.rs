//! Data transfer objects shared by the JSON API.
//!
//! These types define the request and response bodies of every endpoint and double as the
//! OpenAPI schemas served under `/api/docs`.

pub mod admin;
pub mod api;
pub mod company;
pub mod driver;
pub mod integration;
pub mod kyc;
pub mod matching;
pub mod notification;
pub mod otp;
pub mod payment;
pub mod request;
pub mod role;
pub mod stats;
pub mod status;
