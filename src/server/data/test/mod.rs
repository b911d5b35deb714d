mod admin_user;
mod company;
mod company_request;
mod driver;
mod driver_match;
mod notification_template;
mod otp;
mod payment;
mod role;
mod stats;
