//! HTTP adapter for the prediction endpoint.
//!
//! Sends the validated payload as JSON to `POST {base}/predict` and decodes
//! the response body. The endpoint reports model failures through its own
//! `status` field with a non-2xx code, so HTTP status errors are disabled
//! and the body is decoded either way.

use std::time::Duration;

use ureq::Agent;

use crate::domain::{PredictionRequest, PredictionResult};
use crate::ports::Predictor;

/// Base URL used when `HEARTCARE_API_URL` is unset.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Request timeout for the prediction call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for transport and decode failures.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("prediction request failed: {0}")]
    Transport(#[from] ureq::Error),
}

/// ureq-backed client for the prediction endpoint.
pub struct HttpPredictor {
    agent: Agent,
    endpoint: String,
}

impl HttpPredictor {
    /// Create a client against the given base URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.new_agent(),
            endpoint: format!("{}/predict", base_url.trim_end_matches('/')),
        }
    }

    /// Create a client from `HEARTCARE_API_URL`, with a localhost default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("HEARTCARE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// The resolved endpoint URL (for logging and diagnostics).
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    type Error = PredictError;

    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictError> {
        tracing::debug!("POST {}", self.endpoint);

        let mut response = self.agent.post(&self.endpoint).send_json(request)?;
        let result: PredictionResult = response.body_mut().read_json()?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_base_url() {
        let client = HttpPredictor::new("http://assess.example.org:8080");
        assert_eq!(client.endpoint(), "http://assess.example.org:8080/predict");
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let client = HttpPredictor::new("http://127.0.0.1:5000/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:5000/predict");
    }
}
