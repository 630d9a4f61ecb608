//! Predictor port: Trait for the external risk-prediction endpoint.
//!
//! The endpoint is an opaque collaborator; the client sends validated
//! vitals and surfaces its verdict verbatim.

use crate::domain::{PredictionRequest, PredictionResult};

/// Trait for obtaining a risk classification for a validated payload.
pub trait Predictor: Send + Sync {
    /// Error type for transport and decode failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submit the payload and decode the endpoint's response.
    ///
    /// An HTTP error status is not a failure here: the endpoint reports
    /// its own problems through the `status` field of the payload.
    ///
    /// # Errors
    /// Returns error only when the request cannot be sent or the
    /// response body cannot be decoded.
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, Self::Error>;
}
