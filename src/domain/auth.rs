//! Login and registration form validation.

use super::validation::{is_valid_email, ValidationErrors};

/// Login credentials, held as raw strings until validated.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.email.is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Please enter a valid email address");
        }

        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.len() < 6 {
            errors.insert("password", "Password must be at least 6 characters");
        }

        errors
    }
}

/// Registration details, held as raw strings until validated.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required");
        }

        if self.email.is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Please enter a valid email address");
        }

        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.len() < 6 {
            errors.insert("password", "Password must be at least 6 characters");
        }

        if self.confirm_password.is_empty() {
            errors.insert("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }

        errors
    }
}
