//! One-time setup code for creating the first Super Admin.
//!
//! When the application starts without an active Super Admin, a random code is generated
//! and logged together with the setup URL. Whoever holds the code can create the first
//! Super Admin once. Codes live in memory only and expire after 15 minutes.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const SETUP_CODE_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Clone)]
struct SetupCode {
    code: String,
    expires_at: Instant,
}

impl SetupCode {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Clone)]
pub struct SetupCodeService {
    code: Arc<RwLock<Option<SetupCode>>>,
    ttl: Duration,
}

impl SetupCodeService {
    pub fn new() -> Self {
        Self::with_ttl(SETUP_CODE_TTL)
    }

    /// Creates a service whose codes expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Generates a new 32-character alphanumeric code, replacing any previous one.
    ///
    /// # Returns
    /// - `String` - The generated code
    pub async fn generate(&self) -> String {
        let code = Self::generate_random_code();
        *self.code.write().await = Some(SetupCode {
            code: code.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        code
    }

    /// Validates `input` against the stored code and consumes it on success.
    ///
    /// Expired codes are discarded. A wrong code leaves the stored code in place.
    ///
    /// # Returns
    /// - `true` - Code matched and was unexpired; it is now consumed
    /// - `false` - No code, wrong code or expired code
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut code = self.code.write().await;

        let Some(stored) = code.as_ref() else {
            return false;
        };

        if stored.is_expired() {
            *code = None;
            return false;
        }

        if stored.code == input {
            *code = None;
            return true;
        }

        false
    }

    fn generate_random_code() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789";
        const CODE_LENGTH: usize = 32;

        let mut rng = rand::rng();

        (0..CODE_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }

    #[cfg(test)]
    pub async fn has_valid_code(&self) -> bool {
        match self.code.read().await.as_ref() {
            Some(stored) => !stored.is_expired(),
            None => false,
        }
    }
}

impl Default for SetupCodeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    /// Tests that a generated code is 32 alphanumeric characters and valid.
    #[tokio::test]
    async fn generates_alphanumeric_code() {
        let service = SetupCodeService::new();
        assert!(!service.has_valid_code().await);

        let code = service.generate().await;

        assert_eq!(code.len(), 32);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(service.has_valid_code().await);
    }

    /// Tests that a code validates exactly once.
    #[tokio::test]
    async fn code_is_consumed_on_success() {
        let service = SetupCodeService::new();
        let code = service.generate().await;

        assert!(service.validate_and_consume(&code).await);
        assert!(!service.validate_and_consume(&code).await);
        assert!(!service.has_valid_code().await);
    }

    /// Tests that a wrong code does not consume the stored one.
    #[tokio::test]
    async fn wrong_code_keeps_stored_code() {
        let service = SetupCodeService::new();
        let code = service.generate().await;

        assert!(!service.validate_and_consume("wrong").await);
        assert!(service.validate_and_consume(&code).await);
    }

    /// Tests that regenerating replaces the previous code.
    #[tokio::test]
    async fn regenerating_replaces_previous_code() {
        let service = SetupCodeService::new();
        let first = service.generate().await;
        let second = service.generate().await;

        assert!(!service.validate_and_consume(&first).await || first == second);
        assert!(service.validate_and_consume(&second).await || first == second);
    }

    /// Tests that codes stop validating after the TTL.
    #[tokio::test]
    async fn expired_code_fails() {
        let service = SetupCodeService::with_ttl(Duration::from_millis(20));
        let code = service.generate().await;

        sleep(Duration::from_millis(40)).await;

        assert!(!service.has_valid_code().await);
        assert!(!service.validate_and_consume(&code).await);
    }
}
