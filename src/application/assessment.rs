//! Assessment service: validate the intake form, submit it, normalize failures.
//!
//! Submission happens if and only if the validation mapping is empty.
//! Transport and decode failures never escape this service: they are
//! normalized into the error variant of [`PredictionResult`] so the
//! screen stays interactive for retry.

use std::sync::Arc;

use crate::domain::{Assessment, IntakeForm, PredictionResult, ValidationErrors};
use crate::ports::Predictor;

/// Fallback message when a transport failure produces no text.
const NETWORK_ERROR_FALLBACK: &str = "Network error occurred";

/// Service for running a risk assessment against the prediction endpoint.
pub struct AssessmentService<P: Predictor> {
    predictor: Arc<P>,
}

impl<P: Predictor> AssessmentService<P> {
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }

    /// Validate, coerce, and submit the intake form.
    ///
    /// # Errors
    /// Returns the complete error mapping when validation fails; the
    /// network call is not attempted in that case. Endpoint and transport
    /// failures are returned as a successful `Assessment` carrying the
    /// error-status result.
    pub fn assess(&self, form: &IntakeForm) -> Result<Assessment, ValidationErrors> {
        let request = form.to_request()?;

        tracing::info!("Submitting intake for risk assessment");

        let result = match self.predictor.predict(&request) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Prediction request failed: {e}");
                let text = e.to_string();
                let message = if text.trim().is_empty() {
                    NETWORK_ERROR_FALLBACK.to_string()
                } else {
                    text
                };
                PredictionResult::network_error(message)
            }
        };

        if result.is_success() {
            tracing::info!(
                "Assessment complete: prediction={}, probability={:.2}%, risk={}",
                result.prediction,
                result.probability * 100.0,
                result.risk_level()
            );
        } else {
            tracing::warn!("Assessment returned error status: {}", result.error_text());
        }

        Ok(Assessment::new(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionRequest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct MockError(String);

    struct MockPredictor {
        calls: AtomicUsize,
        response: Mutex<Option<Result<PredictionResult, MockError>>>,
        last_request: Mutex<Option<PredictionRequest>>,
    }

    impl MockPredictor {
        fn returning(response: Result<PredictionResult, MockError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Mutex::new(Some(response)),
                last_request: Mutex::new(None),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Predictor for MockPredictor {
        type Error = MockError;

        fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, MockError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().expect("lock") = Some(*request);
            self.response
                .lock()
                .expect("lock")
                .take()
                .unwrap_or_else(|| Err(MockError("exhausted".to_string())))
        }
    }

    fn valid_form() -> IntakeForm {
        IntakeForm {
            age: "54".to_string(),
            sex: "1".to_string(),
            cp: "0".to_string(),
            trestbps: "130".to_string(),
            chol: "246".to_string(),
            fbs: "0".to_string(),
            restecg: "1".to_string(),
            thalch: "150".to_string(),
            exang: "0".to_string(),
            oldpeak: "1.0".to_string(),
        }
    }

    fn success_result() -> PredictionResult {
        PredictionResult {
            status: "success".to_string(),
            prediction: 0,
            probability: 0.12,
            message: None,
        }
    }

    #[test]
    fn test_invalid_form_blocks_submission() {
        let predictor = MockPredictor::returning(Ok(success_result()));
        let service = AssessmentService::new(predictor.clone());

        let mut form = valid_form();
        form.age = "0".to_string();

        let errors = service.assess(&form).expect_err("validation must fail");
        assert_eq!(errors.get("age"), Some("Age must be between 1 and 120"));
        assert_eq!(predictor.call_count(), 0);
    }

    #[test]
    fn test_valid_form_submits_once() {
        let predictor = MockPredictor::returning(Ok(success_result()));
        let service = AssessmentService::new(predictor.clone());

        let assessment = service.assess(&valid_form()).expect("submits");
        assert!(assessment.result.is_success());
        assert_eq!(predictor.call_count(), 1);

        let sent = predictor
            .last_request
            .lock()
            .expect("lock")
            .expect("request captured");
        assert!((sent.age - 54.0).abs() < f64::EPSILON);
        assert!((sent.chol - 246.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transport_failure_is_normalized() {
        let predictor =
            MockPredictor::returning(Err(MockError("connection refused".to_string())));
        let service = AssessmentService::new(predictor);

        let assessment = service.assess(&valid_form()).expect("normalized");
        let result = &assessment.result;
        assert_eq!(result.status, "error");
        assert_eq!(result.prediction, 0);
        assert!(result.probability.abs() < f64::EPSILON);
        assert_eq!(result.error_text(), "connection refused");
    }

    #[test]
    fn test_blank_transport_error_gets_fallback() {
        let predictor = MockPredictor::returning(Err(MockError(String::new())));
        let service = AssessmentService::new(predictor);

        let assessment = service.assess(&valid_form()).expect("normalized");
        assert_eq!(assessment.result.error_text(), "Network error occurred");
    }

    #[test]
    fn test_error_payload_is_surfaced_verbatim() {
        let predictor = MockPredictor::returning(Ok(PredictionResult {
            status: "error".to_string(),
            prediction: 0,
            probability: 0.0,
            message: Some("scaler mismatch".to_string()),
        }));
        let service = AssessmentService::new(predictor);

        let assessment = service.assess(&valid_form()).expect("surfaced");
        assert!(!assessment.result.is_success());
        assert_eq!(assessment.result.error_text(), "scaler mismatch");
    }
}
