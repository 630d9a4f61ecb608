//! Login screen: email + password with inline validation.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::LoginForm;
use crate::domain::ValidationErrors;
use crate::tui::styles::{HeartTheme, LOGO_SMALL};

use super::{centered_rect, render_field_error, render_text_field};

const FIELD_EMAIL: usize = 0;
const FIELD_PASSWORD: usize = 1;
const FIELD_COUNT: usize = 2;

/// Login form state: raw strings plus the per-field error mapping.
#[derive(Default)]
pub struct LoginFormState {
    pub email: String,
    pub password: String,
    pub focus: usize,
    pub errors: ValidationErrors,
    /// Transient notice (auth failure or validation summary)
    pub banner: Option<String>,
}

impl LoginFormState {
    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    /// Append a character to the focused field, clearing its error.
    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.focus {
            FIELD_EMAIL => {
                self.email.push(c);
                self.errors.remove("email");
            }
            _ => {
                self.password.push(c);
                self.errors.remove("password");
            }
        }
        self.banner = None;
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            FIELD_EMAIL => {
                self.email.pop();
                self.errors.remove("email");
            }
            _ => {
                self.password.pop();
                self.errors.remove("password");
            }
        }
    }

    #[must_use]
    pub fn to_form(&self) -> LoginForm {
        LoginForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn apply_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Discard all form state, wiping the password buffer.
    pub fn reset(&mut self) {
        self.password.zeroize();
        self.email.clear();
        self.errors = ValidationErrors::new();
        self.banner = None;
        self.focus = FIELD_EMAIL;
    }
}

/// Render the login screen.
pub fn render_login(f: &mut Frame, area: Rect, state: &LoginFormState, loading: bool) {
    let card = centered_rect(56, 20, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Brand
            Constraint::Length(2), // Card header
            Constraint::Length(3), // Email
            Constraint::Length(1), // Email error
            Constraint::Length(3), // Password
            Constraint::Length(1), // Password error
            Constraint::Length(1), // Banner
            Constraint::Length(2), // Footer hints
            Constraint::Min(0),
        ])
        .split(card);

    let brand = Paragraph::new(vec![
        Line::from(Span::styled(LOGO_SMALL, HeartTheme::subtitle())),
        Line::from(Span::styled(
            "Advanced cardiovascular risk assessment",
            HeartTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(brand, chunks[0]);

    let header = Paragraph::new(vec![
        Line::from(Span::styled("Welcome Back", HeartTheme::title())),
        Line::from(Span::styled(
            "Sign in to access your heart health dashboard",
            HeartTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[1]);

    render_text_field(
        f,
        chunks[2],
        "Email Address",
        &state.email,
        "Enter your email",
        state.focus == FIELD_EMAIL && !loading,
        state.errors.get("email"),
        false,
    );
    render_field_error(f, chunks[3], state.errors.get("email"));

    render_text_field(
        f,
        chunks[4],
        "Password",
        &state.password,
        "Enter your password",
        state.focus == FIELD_PASSWORD && !loading,
        state.errors.get("password"),
        true,
    );
    render_field_error(f, chunks[5], state.errors.get("password"));

    if let Some(banner) = &state.banner {
        let notice = Paragraph::new(Line::from(Span::styled(
            banner.clone(),
            HeartTheme::danger(),
        )))
        .alignment(Alignment::Center);
        f.render_widget(notice, chunks[6]);
    }

    let footer = if loading {
        Paragraph::new(Line::from(Span::styled(
            "Signing in...",
            HeartTheme::text_muted(),
        )))
    } else {
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled("[Enter] ", HeartTheme::key_hint()),
                Span::styled("Sign In ", HeartTheme::key_desc()),
                Span::styled("[Tab] ", HeartTheme::key_hint()),
                Span::styled("Next Field ", HeartTheme::key_desc()),
                Span::styled("[Ctrl+N] ", HeartTheme::key_hint()),
                Span::styled("Create Account", HeartTheme::key_desc()),
            ]),
            Line::from(Span::styled(
                "Demo: any valid email and password (6+ characters)",
                HeartTheme::text_muted(),
            )),
        ])
    }
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[7]);

    let frame_block = Block::default()
        .borders(Borders::ALL)
        .border_style(HeartTheme::border());
    f.render_widget(
        frame_block,
        centered_rect(60, card.height.saturating_add(2), area),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_clears_field_error() {
        let mut state = LoginFormState::default();
        let mut errors = ValidationErrors::new();
        errors.insert("email", "Email is required");
        state.apply_errors(errors);

        assert!(state.errors.get("email").is_some());
        state.input_char('a');
        assert!(state.errors.get("email").is_none());
    }

    #[test]
    fn test_reset_discards_state() {
        let mut state = LoginFormState::default();
        state.email = "a@b.com".to_string();
        state.password = "secret".to_string();
        state.banner = Some("Invalid email or password. Please try again.".to_string());

        state.reset();
        assert!(state.email.is_empty());
        assert!(state.password.is_empty());
        assert!(state.banner.is_none());
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = LoginFormState::default();
        state.next_field();
        assert_eq!(state.focus, FIELD_PASSWORD);
        state.next_field();
        assert_eq!(state.focus, FIELD_EMAIL);
        state.prev_field();
        assert_eq!(state.focus, FIELD_PASSWORD);
    }
}
