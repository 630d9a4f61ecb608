//! Auth port: Trait for the authentication backend.
//!
//! The shipped implementation is a latency-simulating stub; isolating it
//! behind this trait lets a real network client replace it without
//! touching the form screens.

/// Trait for authentication operations.
pub trait AuthService: Send + Sync {
    /// Error type for rejected attempts.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Attempt to sign in with the given credentials.
    ///
    /// # Errors
    /// Returns error when the backend rejects the credentials.
    fn login(&self, email: &str, password: &str) -> Result<(), Self::Error>;

    /// Create a new account.
    ///
    /// # Errors
    /// Returns error when the backend rejects the registration.
    fn register(&self, name: &str, email: &str, password: &str) -> Result<(), Self::Error>;
}
