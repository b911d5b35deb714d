//! Request guards and session wrappers.
//!
//! Handlers authenticate through `AuthGuard` (back-office staff) or `DriverGuard` (driver
//! portal). Both read the account id from the session via the typed wrappers in `session`.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
