//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external systems:
//! - `http`: ureq client for the prediction endpoint
//! - `auth`: latency-simulating authentication stub
//! - `sanitize`: PII filtering for logs

pub mod auth;
pub mod http;
pub mod sanitize;

pub use auth::{AuthError, StubAuthService};
pub use http::{HttpPredictor, PredictError};
