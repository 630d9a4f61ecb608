//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O dependencies.
//! Form types hold raw user-entered strings until validated; wire
//! types are serializable.

mod assessment;
mod auth;
mod intake;
mod validation;

pub use assessment::{Assessment, PredictionResult, RiskLevel};
pub use auth::{LoginForm, RegisterForm};
pub use intake::{IntakeForm, PredictionRequest};
pub use validation::ValidationErrors;
