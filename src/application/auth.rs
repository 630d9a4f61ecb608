//! Auth flows: validate a form, then hand it to the authentication backend.

use std::sync::Arc;

use crate::domain::{LoginForm, RegisterForm, ValidationErrors};
use crate::ports::AuthService;

/// Why a login or registration attempt did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    /// Local validation failed; the backend was not contacted.
    #[error("validation failed: {}", .0.summary())]
    Validation(ValidationErrors),

    /// The backend rejected the attempt.
    #[error("{0}")]
    Rejected(String),
}

/// Orchestrates login and registration against an [`AuthService`].
pub struct AuthFlow<A: AuthService> {
    service: Arc<A>,
}

impl<A: AuthService> AuthFlow<A> {
    pub fn new(service: Arc<A>) -> Self {
        Self { service }
    }

    /// Validate and submit a login attempt.
    ///
    /// # Errors
    /// Returns the error mapping on validation failure (no backend call),
    /// or the backend's rejection message.
    pub fn login(&self, form: &LoginForm) -> Result<(), AuthFlowError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(AuthFlowError::Validation(errors));
        }

        self.service
            .login(&form.email, &form.password)
            .map_err(|e| AuthFlowError::Rejected(e.to_string()))?;

        tracing::info!("Login accepted");
        Ok(())
    }

    /// Validate and submit a registration attempt.
    ///
    /// # Errors
    /// Same contract as [`AuthFlow::login`].
    pub fn register(&self, form: &RegisterForm) -> Result<(), AuthFlowError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(AuthFlowError::Validation(errors));
        }

        self.service
            .register(&form.name, &form.email, &form.password)
            .map_err(|e| AuthFlowError::Rejected(e.to_string()))?;

        tracing::info!("Registration accepted");
        Ok(())
    }
}
