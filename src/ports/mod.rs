//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (prediction endpoint,
//! authentication backend).

mod auth;
mod predictor;

pub use auth::AuthService;
pub use predictor::Predictor;
