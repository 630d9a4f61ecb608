//! Prediction result types and risk classification.
//!
//! The client performs no inference: results are decoded verbatim from the
//! prediction endpoint and only interpreted for presentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback text when an error payload carries no message.
const ERROR_FALLBACK: &str = "An error occurred during prediction";

/// Risk classification derived from the endpoint's binary prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Prediction 0 (or anything other than 1)
    Low,
    /// Prediction 1
    Elevated,
}

impl RiskLevel {
    /// Headline shown above the risk badge.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Low => "Low Heart Disease Risk",
            Self::Elevated => "Heart Disease Risk Detected",
        }
    }

    /// Advisory paragraph shown under the badge.
    #[must_use]
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Low => {
                "This assessment suggests lower risk factors. Continue maintaining \
                 a healthy lifestyle and regular medical check-ups."
            }
            Self::Elevated => {
                "This assessment indicates elevated risk factors. Please consult with \
                 a healthcare professional for proper medical evaluation and treatment \
                 recommendations."
            }
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Elevated => write!(f, "ELEVATED"),
        }
    }
}

/// Response payload of the prediction endpoint, surfaced verbatim.
///
/// Any payload whose `status` is not `"success"` is treated as an error;
/// transport failures are normalized into this shape rather than propagated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub status: String,
    /// Binary prediction: 1 = disease risk detected
    #[serde(default)]
    pub prediction: i64,
    /// Probability of the predicted class, in [0, 1]
    #[serde(default)]
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PredictionResult {
    /// Synthesize the error variant used for network and decode failures.
    #[must_use]
    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            prediction: 0,
            probability: 0.0,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        if self.prediction == 1 {
            RiskLevel::Elevated
        } else {
            RiskLevel::Low
        }
    }

    /// Badge text, e.g. `Risk Probability: 82.0%`.
    #[must_use]
    pub fn probability_label(&self) -> String {
        format!("Risk Probability: {:.1}%", self.probability * 100.0)
    }

    /// Error message with the fixed fallback when absent.
    #[must_use]
    pub fn error_text(&self) -> &str {
        self.message.as_deref().unwrap_or(ERROR_FALLBACK)
    }
}

/// A completed assessment: the endpoint's verdict plus when it arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub result: PredictionResult,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(result: PredictionResult) -> Self {
        Self {
            result,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevated_risk_rendering() {
        let result = PredictionResult {
            status: "success".to_string(),
            prediction: 1,
            probability: 0.82,
            message: None,
        };
        assert!(result.is_success());
        assert_eq!(result.risk_level(), RiskLevel::Elevated);
        assert_eq!(result.probability_label(), "Risk Probability: 82.0%");
        assert_eq!(result.risk_level().headline(), "Heart Disease Risk Detected");
    }

    #[test]
    fn test_low_risk_rendering() {
        let result = PredictionResult {
            status: "success".to_string(),
            prediction: 0,
            probability: 0.12,
            message: None,
        };
        assert_eq!(result.risk_level(), RiskLevel::Low);
        assert_eq!(result.probability_label(), "Risk Probability: 12.0%");
        assert_eq!(result.risk_level().headline(), "Low Heart Disease Risk");
    }

    #[test]
    fn test_non_one_prediction_is_low_risk() {
        let result = PredictionResult {
            status: "success".to_string(),
            prediction: 2,
            probability: 0.5,
            message: None,
        };
        assert_eq!(result.risk_level(), RiskLevel::Low);
    }

    #[test]
    fn test_error_payload_fallback_message() {
        let result: PredictionResult =
            serde_json::from_str(r#"{"status":"error"}"#).expect("decodes");
        assert!(!result.is_success());
        assert_eq!(result.error_text(), "An error occurred during prediction");
        assert_eq!(result.prediction, 0);
    }

    #[test]
    fn test_error_payload_with_message() {
        let result: PredictionResult =
            serde_json::from_str(r#"{"status":"error","message":"model unavailable"}"#)
                .expect("decodes");
        assert_eq!(result.error_text(), "model unavailable");
    }

    #[test]
    fn test_network_error_shape() {
        let result = PredictionResult::network_error("connection refused");
        assert_eq!(result.status, "error");
        assert_eq!(result.prediction, 0);
        assert!(result.probability.abs() < f64::EPSILON);
        assert_eq!(result.error_text(), "connection refused");
    }

    #[test]
    fn test_success_payload_decodes() {
        let result: PredictionResult =
            serde_json::from_str(r#"{"status":"success","prediction":1,"probability":0.82}"#)
                .expect("decodes");
        assert!(result.is_success());
        assert_eq!(result.prediction, 1);
    }
}
