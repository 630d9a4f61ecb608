//! UI module: View components for the TUI.

pub mod intake;
pub mod login;
pub mod register;
pub mod result;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::HeartTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "MEDICAL DISCLAIMER: This tool is for educational purposes only and should not \
         replace professional medical advice. Always consult with qualified healthcare \
         providers for medical decisions.",
        HeartTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(HeartTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Center a fixed-size rect inside the given area, clamped to fit.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Render a single-line text input with label, focus and error styling.
pub fn render_text_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    error: Option<&str>,
    mask: bool,
) {
    let border_style = if error.is_some() {
        HeartTheme::danger()
    } else if focused {
        HeartTheme::border_focused()
    } else {
        HeartTheme::border()
    };

    let title_style = if focused {
        HeartTheme::focused()
    } else {
        HeartTheme::text_secondary()
    };

    let block = Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let masked;
    let shown = if mask {
        masked = "•".repeat(value.chars().count());
        masked.as_str()
    } else {
        value
    };

    let value_display = if shown.is_empty() {
        Span::styled(placeholder.to_string(), HeartTheme::text_muted())
    } else {
        Span::styled(shown.to_string(), HeartTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if focused {
            Span::styled("▌", HeartTheme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}

/// Render an inline field error line (blank when there is none).
pub fn render_field_error(f: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(message) = error {
        let p = Paragraph::new(Line::from(vec![
            Span::styled(" ! ", HeartTheme::danger()),
            Span::styled(message.to_string(), HeartTheme::danger()),
        ]));
        f.render_widget(p, area);
    }
}
