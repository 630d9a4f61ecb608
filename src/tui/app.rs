//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//! - Background auth and prediction workers

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{HttpPredictor, StubAuthService};
use crate::application::{AssessmentService, AuthFlow};

use super::ui::{
    intake::{render_intake, IntakeFormState},
    login::{render_login, LoginFormState},
    register::{render_register, RegisterFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};
use super::worker::{
    spawn_assessment, spawn_login, spawn_register, AssessmentProgress, AuthProgress, WorkerHandle,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Intake,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthIntent {
    Login,
    Register,
}

struct PendingAuth {
    intent: AuthIntent,
    handle: WorkerHandle<AuthProgress>,
}

const VALIDATION_BANNER: &str = "Please fill in all fields correctly.";

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Assessment service (validation + prediction endpoint)
    assessment: Arc<AssessmentService<HttpPredictor>>,

    /// Auth flow (validation + credential check)
    auth: Arc<AuthFlow<StubAuthService>>,

    /// Login form state
    login_form: LoginFormState,

    /// Registration form state
    register_form: RegisterFormState,

    /// Intake form state
    intake_form: IntakeFormState,

    /// Assessment view state
    result_state: ResultState,

    /// Pending auth worker (if running)
    pending_auth: Option<PendingAuth>,

    /// Pending assessment worker (if running)
    pending_assessment: Option<WorkerHandle<AssessmentProgress>>,

    /// When the current submission started (for UI animation)
    submit_started_at: Option<Instant>,
}

impl App {
    /// Create a new application instance using default adapters.
    ///
    /// This is a convenience method that constructs all adapters internally.
    /// For more control, use `with_dependencies()`.
    ///
    /// # Errors
    /// Returns error if services cannot be initialized.
    pub fn new() -> Result<Self> {
        let predictor = HttpPredictor::from_env();
        tracing::info!(endpoint = predictor.endpoint(), "Prediction endpoint configured");

        let assessment = Arc::new(AssessmentService::new(Arc::new(predictor)));
        let auth = Arc::new(AuthFlow::new(Arc::new(StubAuthService::new())));

        Ok(Self::with_dependencies(assessment, auth))
    }

    /// Create application with injected dependencies (Composition Root pattern).
    ///
    /// This allows `main.rs` or tests to construct all adapters externally.
    #[must_use]
    pub fn with_dependencies(
        assessment: Arc<AssessmentService<HttpPredictor>>,
        auth: Arc<AuthFlow<StubAuthService>>,
    ) -> Self {
        Self {
            screen: Screen::Login,
            should_quit: false,
            assessment,
            auth,
            login_form: LoginFormState::default(),
            register_form: RegisterFormState::default(),
            intake_form: IntakeFormState::default(),
            result_state: ResultState::default(),
            pending_auth: None,
            pending_assessment: None,
            submit_started_at: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Poll pending workers for progress updates
            self.poll_workers();

            // Animate submission progress (fake loading bar)
            self.tick_submit_progress();

            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Login => {
                        let loading = matches!(
                            self.pending_auth,
                            Some(PendingAuth {
                                intent: AuthIntent::Login,
                                ..
                            })
                        );
                        render_login(f, content_area, &self.login_form, loading);
                    }
                    Screen::Register => {
                        let loading = matches!(
                            self.pending_auth,
                            Some(PendingAuth {
                                intent: AuthIntent::Register,
                                ..
                            })
                        );
                        render_register(f, content_area, &self.register_form, loading);
                    }
                    Screen::Intake => render_intake(f, content_area, &self.intake_form),
                    Screen::Result => render_result(f, content_area, &self.result_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background workers for progress updates.
    fn poll_workers(&mut self) {
        loop {
            let progress = match self
                .pending_auth
                .as_ref()
                .and_then(|pending| pending.handle.try_recv())
            {
                Some(p) => p,
                None => break,
            };

            let intent = match &self.pending_auth {
                Some(pending) => pending.intent,
                None => break,
            };

            match progress {
                AuthProgress::Succeeded => {
                    tracing::info!("Authentication succeeded");
                    self.login_form.reset();
                    self.register_form.reset();
                    self.intake_form = IntakeFormState::default();
                    self.result_state = ResultState::Idle;
                    self.screen = Screen::Intake;
                    self.pending_auth = None;
                    break;
                }
                AuthProgress::Failed(message) => {
                    tracing::warn!("Authentication failed");
                    match intent {
                        AuthIntent::Login => self.login_form.banner = Some(message),
                        AuthIntent::Register => self.register_form.banner = Some(message),
                    }
                    self.pending_auth = None;
                    break;
                }
            }
        }

        loop {
            let progress = match self
                .pending_assessment
                .as_ref()
                .and_then(|worker| worker.try_recv())
            {
                Some(p) => p,
                None => break,
            };

            match progress {
                AssessmentProgress::Submitted => {}
                AssessmentProgress::Finished(assessment) => {
                    self.result_state = ResultState::Complete { assessment };
                    self.pending_assessment = None;
                    self.submit_started_at = None;
                    break;
                }
            }
        }
    }

    fn tick_submit_progress(&mut self) {
        if self.pending_assessment.is_none() {
            return;
        }
        let Some(started_at) = self.submit_started_at else {
            return;
        };
        let ResultState::Submitting { progress } = self.result_state else {
            return;
        };

        let elapsed = Instant::now()
            .saturating_duration_since(started_at)
            .as_secs_f64();

        // Smooth, monotonic fake progress: asymptotically approaches the target.
        let (floor, target, tau) = (0.03, 0.95, 2.0);
        let k = 1.0 - (-elapsed / tau).exp();
        let desired = (floor + (target - floor) * k).clamp(0.0, target);
        let new_progress = desired.max(progress).min(target);

        self.result_state = ResultState::Submitting {
            progress: new_progress,
        };
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key, modifiers),
            Screen::Register => self.handle_register_key(key),
            Screen::Intake => self.handle_intake_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Inputs are frozen while a sign-in attempt is in flight.
        if self.pending_auth.is_some() {
            return;
        }

        // Ctrl+N before plain character input, otherwise 'n' types into the field.
        if key == KeyCode::Char('n') && modifiers.contains(KeyModifiers::CONTROL) {
            self.screen = Screen::Register;
            return;
        }

        match key {
            KeyCode::Tab | KeyCode::Down => self.login_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.login_form.prev_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Char(c) => self.login_form.input_char(c),
            KeyCode::Backspace => self.login_form.delete_char(),
            _ => {}
        }
    }

    fn handle_register_key(&mut self, key: KeyCode) {
        if self.pending_auth.is_some() {
            return;
        }

        match key {
            KeyCode::Esc => {
                self.register_form.reset();
                self.screen = Screen::Login;
            }
            KeyCode::Tab | KeyCode::Down => self.register_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.register_form.prev_field(),
            KeyCode::Enter => self.submit_register(),
            KeyCode::Char(c) => self.register_form.input_char(c),
            KeyCode::Backspace => self.register_form.delete_char(),
            _ => {}
        }
    }

    fn handle_intake_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('l') | KeyCode::Char('L') => self.logout(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.intake_form.load_sample_data(),
            KeyCode::Up | KeyCode::BackTab => self.intake_form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.intake_form.next_field(),
            KeyCode::Left => self.intake_form.cycle_choice(-1),
            KeyCode::Right => self.intake_form.cycle_choice(1),
            KeyCode::Char(c) => self.intake_form.input_char(c),
            KeyCode::Backspace => self.intake_form.delete_char(),
            KeyCode::Delete => self.intake_form.clear_field(),
            KeyCode::Enter => self.submit_intake(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match &self.result_state {
            ResultState::Complete { assessment } if assessment.result.is_success() => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Intake;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.intake_form = IntakeFormState::default();
                    self.screen = Screen::Intake;
                }
                KeyCode::Char('l') | KeyCode::Char('L') => self.logout(),
                _ => {}
            },
            ResultState::Complete { .. } => match key {
                // Resubmit the intact form directly.
                KeyCode::Enter => {
                    self.screen = Screen::Intake;
                    self.submit_intake();
                }
                // Back to the intake form with its values intact.
                KeyCode::Esc => {
                    self.screen = Screen::Intake;
                }
                _ => {}
            },
            // Keys are inert while the request is in flight.
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let form = self.login_form.to_form();
        let errors = form.validate();
        if !errors.is_empty() {
            self.login_form.apply_errors(errors);
            self.login_form.banner = Some(VALIDATION_BANNER.to_string());
            return;
        }

        self.login_form.banner = None;
        self.pending_auth = Some(PendingAuth {
            intent: AuthIntent::Login,
            handle: spawn_login(self.auth.clone(), form),
        });
    }

    fn submit_register(&mut self) {
        let form = self.register_form.to_form();
        let errors = form.validate();
        if !errors.is_empty() {
            self.register_form.apply_errors(errors);
            self.register_form.banner = Some(VALIDATION_BANNER.to_string());
            return;
        }

        self.register_form.banner = None;
        self.pending_auth = Some(PendingAuth {
            intent: AuthIntent::Register,
            handle: spawn_register(self.auth.clone(), form),
        });
    }

    fn submit_intake(&mut self) {
        // One prediction at a time; repeat presses are ignored until it lands.
        if self.pending_assessment.is_some() {
            return;
        }

        let form = self.intake_form.to_form();
        let errors = form.validate();
        if !errors.is_empty() {
            self.intake_form.apply_errors(&errors);
            return;
        }

        self.screen = Screen::Result;
        self.result_state = ResultState::Submitting { progress: 0.0 };
        self.submit_started_at = Some(Instant::now());
        self.pending_assessment = Some(spawn_assessment(self.assessment.clone(), form));
    }

    fn logout(&mut self) {
        tracing::info!("User logged out");
        self.login_form.reset();
        self.register_form.reset();
        self.intake_form = IntakeFormState::default();
        self.result_state = ResultState::Idle;
        self.pending_assessment = None;
        self.submit_started_at = None;
        self.screen = Screen::Login;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionResult;
    use std::time::Duration;

    fn app() -> App {
        // Unreachable endpoint; submissions fail fast without a server.
        let predictor = Arc::new(HttpPredictor::new("http://127.0.0.1:1"));
        let assessment = Arc::new(AssessmentService::new(predictor));
        let auth = Arc::new(AuthFlow::new(Arc::new(StubAuthService::with_latency(
            Duration::ZERO,
        ))));
        App::with_dependencies(assessment, auth)
    }

    fn app_with_error_result() -> App {
        let mut app = app();
        app.intake_form.load_sample_data();
        app.screen = Screen::Result;
        app.result_state = ResultState::Complete {
            assessment: crate::domain::Assessment::new(PredictionResult::network_error(
                "connection refused",
            )),
        };
        app
    }

    #[test]
    fn test_enter_on_error_result_resubmits() {
        let mut app = app_with_error_result();

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::Result);
        assert!(matches!(app.result_state, ResultState::Submitting { .. }));
        assert!(app.pending_assessment.is_some());
    }

    #[test]
    fn test_esc_on_error_result_returns_to_intake() {
        let mut app = app_with_error_result();

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::Intake);
        assert!(app.pending_assessment.is_none());
        // The entered values survive the round trip.
        assert_eq!(app.intake_form.to_form().age, "54");
    }

    #[test]
    fn test_submit_is_single_flight() {
        let mut app = app();
        app.intake_form.load_sample_data();
        app.screen = Screen::Intake;

        app.submit_intake();
        let first_started_at = app.submit_started_at;
        assert!(app.pending_assessment.is_some());

        app.submit_intake();
        assert_eq!(app.submit_started_at, first_started_at);
    }

    #[test]
    fn test_invalid_intake_stays_on_form() {
        let mut app = app();
        app.screen = Screen::Intake;

        app.submit_intake();

        assert_eq!(app.screen, Screen::Intake);
        assert!(app.pending_assessment.is_none());
        assert_eq!(app.intake_form.error_count(), 10);
    }
}
