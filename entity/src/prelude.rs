pub use super::admin_user::Entity as AdminUser;
pub use super::admin_user_role::Entity as AdminUserRole;
pub use super::company::Entity as Company;
pub use super::company_request::Entity as CompanyRequest;
pub use super::driver::Entity as Driver;
pub use super::driver_document::Entity as DriverDocument;
pub use super::driver_match::Entity as DriverMatch;
pub use super::driver_verification_log::Entity as DriverVerificationLog;
pub use super::notification_log::Entity as NotificationLog;
pub use super::notification_template::Entity as NotificationTemplate;
pub use super::otp_verification::Entity as OtpVerification;
pub use super::payment_transaction::Entity as PaymentTransaction;
pub use super::permission::Entity as Permission;
pub use super::role::Entity as Role;
pub use super::role_permission::Entity as RolePermission;
