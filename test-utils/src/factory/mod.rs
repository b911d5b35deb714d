//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization and a
//! `create_*` convenience function for quick default creation. Helpers in `helpers` create
//! entities together with the rows they depend on.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let admin = factory::create_admin(&db).await?;
//!     let driver = factory::driver::DriverFactory::new(&db)
//!         .verification_status("verified")
//!         .build()
//!         .await?;
//!
//!     let (company, request) = factory::helpers::create_request_with_company(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `admin_user` - Back-office staff accounts
//! - `role` - Roles, permissions and their assignments
//! - `driver` - Drivers at any KYC/verification stage
//! - `company` - Client companies
//! - `company_request` - Job requests
//! - `driver_match` - Driver to request matches
//! - `notification_template` - Notification templates
//! - `helpers` - ID generation and multi-entity helpers

pub mod admin_user;
pub mod company;
pub mod company_request;
pub mod driver;
pub mod driver_match;
pub mod helpers;
pub mod notification_template;
pub mod role;

pub use admin_user::create_admin;
pub use company::create_company;
pub use company_request::create_request;
pub use driver::{create_driver, create_verified_driver};
pub use driver_match::create_match;
pub use notification_template::create_template;
pub use role::{assign_role, create_role, create_role_with_permissions};
