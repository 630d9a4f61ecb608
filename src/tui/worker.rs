//! Background workers for non-blocking network and auth calls.
//!
//! The prediction request and the simulated auth latency are the only
//! blocking operations in the client; both run on a spawned thread and
//! report back over an mpsc channel polled by the main loop. Exactly one
//! worker of each kind may be pending at a time.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::{AssessmentService, AuthFlow, AuthFlowError};
use crate::domain::{Assessment, IntakeForm, LoginForm, PredictionResult, RegisterForm};
use crate::ports::{AuthService, Predictor};

/// Handle to a running background worker.
pub struct WorkerHandle<T> {
    rx: Receiver<T>,
    /// Thread handle (kept so the thread is not detached silently)
    _handle: JoinHandle<()>,
}

impl<T> WorkerHandle<T> {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

/// Progress updates from an assessment worker.
#[derive(Debug, Clone)]
pub enum AssessmentProgress {
    /// Payload accepted, request in flight
    Submitted,
    /// Endpoint verdict received (possibly an error-status result)
    Finished(Assessment),
}

/// Outcome of a background login or registration attempt.
#[derive(Debug, Clone)]
pub enum AuthProgress {
    Succeeded,
    Failed(String),
}

/// Spawn a background assessment request.
pub fn spawn_assessment<P>(
    service: Arc<AssessmentService<P>>,
    form: IntakeForm,
) -> WorkerHandle<AssessmentProgress>
where
    P: Predictor + 'static,
{
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let _ = tx.send(AssessmentProgress::Submitted);

        let assessment = match service.assess(&form) {
            Ok(assessment) => assessment,
            // The screen validates before spawning, so this path only fires
            // if the form changed mid-flight; surface it as an error result.
            Err(errors) => Assessment::new(PredictionResult::network_error(errors.summary())),
        };

        let _ = tx.send(AssessmentProgress::Finished(assessment));
    });

    WorkerHandle {
        rx,
        _handle: handle,
    }
}

/// Spawn a background login attempt.
pub fn spawn_login<A>(flow: Arc<AuthFlow<A>>, form: LoginForm) -> WorkerHandle<AuthProgress>
where
    A: AuthService + 'static,
{
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let progress = match flow.login(&form) {
            Ok(()) => AuthProgress::Succeeded,
            Err(e) => AuthProgress::Failed(flow_error_text(e)),
        };
        let _ = tx.send(progress);
    });

    WorkerHandle {
        rx,
        _handle: handle,
    }
}

/// Spawn a background registration attempt.
pub fn spawn_register<A>(flow: Arc<AuthFlow<A>>, form: RegisterForm) -> WorkerHandle<AuthProgress>
where
    A: AuthService + 'static,
{
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let progress = match flow.register(&form) {
            Ok(()) => AuthProgress::Succeeded,
            Err(e) => AuthProgress::Failed(flow_error_text(e)),
        };
        let _ = tx.send(progress);
    });

    WorkerHandle {
        rx,
        _handle: handle,
    }
}

fn flow_error_text(error: AuthFlowError) -> String {
    match error {
        AuthFlowError::Validation(errors) => errors.summary(),
        AuthFlowError::Rejected(message) => message,
    }
}
