//! Latency-simulating authentication stub.
//!
//! Stands in for a real authentication backend: it pauses for a fixed
//! delay, then accepts any well-formed credentials. The rejection path
//! exists for the trait contract but is unreachable once form validation
//! has passed.

use std::thread;
use std::time::Duration;

use crate::ports::AuthService;

/// Simulated round-trip latency for login and registration.
const SIMULATED_LATENCY: Duration = Duration::from_millis(1500);

/// Error type for rejected stub attempts.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,
}

/// Authentication stub with injectable latency.
pub struct StubAuthService {
    latency: Duration,
}

impl StubAuthService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: SIMULATED_LATENCY,
        }
    }

    /// Override the simulated latency (tests use `Duration::ZERO`).
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for StubAuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthService for StubAuthService {
    type Error = AuthError;

    fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        thread::sleep(self.latency);

        if !email.is_empty() && password.len() >= 6 {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    fn register(&self, _name: &str, _email: &str, _password: &str) -> Result<(), AuthError> {
        thread::sleep(self.latency);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub() -> StubAuthService {
        StubAuthService::with_latency(Duration::ZERO)
    }

    #[test]
    fn test_login_accepts_valid_credentials() {
        assert!(stub().login("a@b.com", "123456").is_ok());
    }

    #[test]
    fn test_login_rejects_short_password() {
        let err = stub().login("a@b.com", "12345").expect_err("must reject");
        assert_eq!(
            err.to_string(),
            "Invalid email or password. Please try again."
        );
    }

    #[test]
    fn test_login_rejects_empty_email() {
        assert!(stub().login("", "123456").is_err());
    }

    #[test]
    fn test_register_always_succeeds() {
        assert!(stub().register("Jo", "jo@clinic.org", "abcdef").is_ok());
    }
}
