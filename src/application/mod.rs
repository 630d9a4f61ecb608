//! Application layer: Use cases orchestrating domain and ports.

mod assessment;
mod auth;

pub use assessment::AssessmentService;
pub use auth::{AuthFlow, AuthFlowError};
