//! Registration screen: name, email, password, confirmation.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::RegisterForm;
use crate::domain::ValidationErrors;
use crate::tui::styles::{HeartTheme, LOGO_SMALL};

use super::{centered_rect, render_field_error, render_text_field};

const FIELD_NAME: usize = 0;
const FIELD_EMAIL: usize = 1;
const FIELD_PASSWORD: usize = 2;
const FIELD_CONFIRM: usize = 3;
const FIELD_COUNT: usize = 4;

/// Registration form state: raw strings plus the per-field error mapping.
#[derive(Default)]
pub struct RegisterFormState {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub focus: usize,
    pub errors: ValidationErrors,
    pub banner: Option<String>,
}

impl RegisterFormState {
    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    fn focused_key(&self) -> &'static str {
        match self.focus {
            FIELD_NAME => "name",
            FIELD_EMAIL => "email",
            FIELD_PASSWORD => "password",
            _ => "confirmPassword",
        }
    }

    /// Append a character to the focused field, clearing its error.
    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let key = self.focused_key();
        match self.focus {
            FIELD_NAME => self.name.push(c),
            FIELD_EMAIL => self.email.push(c),
            FIELD_PASSWORD => self.password.push(c),
            _ => self.confirm_password.push(c),
        }
        self.errors.remove(key);
        self.banner = None;
    }

    pub fn delete_char(&mut self) {
        let key = self.focused_key();
        match self.focus {
            FIELD_NAME => self.name.pop(),
            FIELD_EMAIL => self.email.pop(),
            FIELD_PASSWORD => self.password.pop(),
            _ => self.confirm_password.pop(),
        };
        self.errors.remove(key);
    }

    #[must_use]
    pub fn to_form(&self) -> RegisterForm {
        RegisterForm {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }

    pub fn apply_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Discard all form state, wiping both password buffers.
    pub fn reset(&mut self) {
        self.password.zeroize();
        self.confirm_password.zeroize();
        self.name.clear();
        self.email.clear();
        self.errors = ValidationErrors::new();
        self.banner = None;
        self.focus = FIELD_NAME;
    }
}

/// Render the registration screen.
pub fn render_register(f: &mut Frame, area: Rect, state: &RegisterFormState, loading: bool) {
    let card = centered_rect(56, 26, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Brand
            Constraint::Length(2), // Card header
            Constraint::Length(3), // Name
            Constraint::Length(1),
            Constraint::Length(3), // Email
            Constraint::Length(1),
            Constraint::Length(3), // Password
            Constraint::Length(1),
            Constraint::Length(3), // Confirm password
            Constraint::Length(1),
            Constraint::Length(1), // Banner
            Constraint::Length(1), // Footer hints
            Constraint::Min(0),
        ])
        .split(card);

    let brand = Paragraph::new(vec![
        Line::from(Span::styled(LOGO_SMALL, HeartTheme::subtitle())),
        Line::from(Span::styled(
            "Create your account",
            HeartTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(brand, chunks[0]);

    let header = Paragraph::new(vec![
        Line::from(Span::styled("Create Account", HeartTheme::title())),
        Line::from(Span::styled(
            "Join HeartCare AI for personalized heart health insights",
            HeartTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[1]);

    let fields: [(&str, &str, &String, &str, bool); 4] = [
        ("Full Name", "name", &state.name, "Enter your full name", false),
        ("Email Address", "email", &state.email, "Enter your email", false),
        ("Password", "password", &state.password, "Create a password", true),
        (
            "Confirm Password",
            "confirmPassword",
            &state.confirm_password,
            "Re-enter your password",
            true,
        ),
    ];

    for (i, (label, key, value, placeholder, mask)) in fields.into_iter().enumerate() {
        let field_area = chunks[2 + i * 2];
        let error_area = chunks[3 + i * 2];
        render_text_field(
            f,
            field_area,
            label,
            value,
            placeholder,
            state.focus == i && !loading,
            state.errors.get(key),
            mask,
        );
        render_field_error(f, error_area, state.errors.get(key));
    }

    if let Some(banner) = &state.banner {
        let notice = Paragraph::new(Line::from(Span::styled(
            banner.clone(),
            HeartTheme::danger(),
        )))
        .alignment(Alignment::Center);
        f.render_widget(notice, chunks[10]);
    }

    let footer = if loading {
        Paragraph::new(Line::from(Span::styled(
            "Creating account...",
            HeartTheme::text_muted(),
        )))
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled("Create Account ", HeartTheme::key_desc()),
            Span::styled("[Tab] ", HeartTheme::key_hint()),
            Span::styled("Next Field ", HeartTheme::key_desc()),
            Span::styled("[Esc] ", HeartTheme::key_hint()),
            Span::styled("Back to Sign In", HeartTheme::key_desc()),
        ]))
    }
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[11]);

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
    fn test_edit_clears_confirm_error() {
        let mut state = RegisterFormState::default();
        let mut errors = ValidationErrors::new();
        errors.insert("confirmPassword", "Passwords do not match");
        state.apply_errors(errors);

        state.focus = FIELD_CONFIRM;
        state.input_char('x');
        assert!(state.errors.get("confirmPassword").is_none());
    }

    #[test]
    fn test_reset_wipes_passwords() {
        let mut state = RegisterFormState::default();
        state.name = "Jo".to_string();
        state.password = "abcdef".to_string();
        state.confirm_password = "abcdef".to_string();

        state.reset();
        assert!(state.name.is_empty());
        assert!(state.password.is_empty());
        assert!(state.confirm_password.is_empty());
        assert_eq!(state.focus, FIELD_NAME);
    }
}
