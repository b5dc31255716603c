//! Rate limiting middleware
//!
//! In-process keyed rate limiting for credential endpoints, to slow down
//! password guessing.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::warn;

use crate::utils::errors::{LifelinkError, Result};

/// Keyed limiter for login attempts
#[derive(Clone)]
pub struct LoginRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
}

impl LoginRateLimiter {
    /// Create a limiter allowing `attempts_per_minute` checks per key
    pub fn new(attempts_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(attempts_per_minute.max(1)).unwrap_or(NonZeroU32::MIN),
        );

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    /// Check the limit for a key, normally the login email
    pub fn check(&self, key: &str) -> Result<()> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => Ok(()),
            Err(_) => {
                warn!(key = key, "Login rate limit exceeded");
                Err(LifelinkError::RateLimitExceeded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_enforced_per_key() {
        let limiter = LoginRateLimiter::new(2);

        assert!(limiter.check("a@example.com").is_ok());
        assert!(limiter.check("a@example.com").is_ok());
        assert!(limiter.check("a@example.com").is_err());

        // A different key has its own budget
        assert!(limiter.check("b@example.com").is_ok());
    }

    #[test]
    fn test_zero_configuration_still_allows_one() {
        let limiter = LoginRateLimiter::new(0);
        assert!(limiter.check("a@example.com").is_ok());
        assert!(limiter.check("a@example.com").is_err());
    }
}
