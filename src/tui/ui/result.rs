//! Risk assessment progress and result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::Assessment;
use crate::tui::styles::HeartTheme;

/// Assessment view state.
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// No assessment yet
    #[default]
    Idle,
    /// Request in flight
    Submitting { progress: f64 },
    /// Endpoint verdict received (success or error status)
    Complete { assessment: Assessment },
}

/// Render the assessment view.
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    render_result_content(f, chunks[1], state);
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("Risk Assessment", HeartTheme::title()),
        Span::styled(
            " │ AI-powered cardiovascular prediction",
            HeartTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_result_content(f: &mut Frame, area: Rect, state: &ResultState) {
    match state {
        ResultState::Idle => render_idle(f, area),
        ResultState::Submitting { progress } => render_progress(f, area, *progress),
        ResultState::Complete { assessment } => {
            if assessment.result.is_success() {
                render_verdict(f, area, assessment);
            } else {
                render_error(f, area, assessment.result.error_text());
            }
        }
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No assessment yet",
            HeartTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter patient information to begin",
            HeartTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_progress(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let stage_text = Paragraph::new(Line::from(vec![
        Span::styled("Stage: ", HeartTheme::text_secondary()),
        Span::styled("Analyzing", HeartTheme::focused()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(stage_text, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(HeartTheme::border()),
        )
        .gauge_style(HeartTheme::info())
        .percent((progress * 100.0) as u16)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);

    let desc = Paragraph::new(Line::from(Span::styled(
        "Submitting vitals to the prediction service...",
        HeartTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(desc, chunks[2]);
}

fn render_verdict(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let result = &assessment.result;
    let risk = result.risk_level();
    let risk_style = HeartTheme::risk_level(risk);

    let block = Block::default()
        .title(Span::styled(" Assessment Result ", HeartTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(HeartTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Headline
            Constraint::Length(4), // Probability gauge
            Constraint::Length(4), // Advisory
            Constraint::Length(1), // Timestamp
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let headline = Paragraph::new(Line::from(Span::styled(
        risk.headline(),
        risk_style.add_modifier(ratatui::style::Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    let prob_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", result.probability_label()),
                    HeartTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(HeartTheme::border()),
        )
        .gauge_style(risk_style)
        // The endpoint is not trusted to keep probability in [0, 1].
        .percent(((result.probability * 100.0) as u16).min(100));
    f.render_widget(prob_gauge, chunks[1]);

    let advisory = Paragraph::new(Line::from(Span::styled(
        risk.advisory(),
        HeartTheme::text(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(advisory, chunks[2]);

    let timestamp = Paragraph::new(Line::from(Span::styled(
        format!(
            "Assessed at {}",
            assessment.created_at.format("%Y-%m-%d %H:%M UTC")
        ),
        HeartTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(timestamp, chunks[3]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", HeartTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Error: {message}"),
            HeartTheme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Failed to get prediction. Please try again.",
            HeartTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(HeartTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { assessment } if assessment.result.is_success() => {
            Line::from(vec![
                Span::styled("[Enter] ", HeartTheme::key_hint()),
                Span::styled("Back ", HeartTheme::key_desc()),
                Span::styled("[N] ", HeartTheme::key_hint()),
                Span::styled("New Assessment ", HeartTheme::key_desc()),
                Span::styled("[L] ", HeartTheme::key_hint()),
                Span::styled("Logout", HeartTheme::key_desc()),
            ])
        }
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled("Retry ", HeartTheme::key_desc()),
            Span::styled("[Esc] ", HeartTheme::key_hint()),
            Span::styled("Back", HeartTheme::key_desc()),
        ]),
        _ => Line::from(vec![Span::styled(
            "Analyzing...",
            HeartTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Assessment, PredictionResult};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &ResultState) {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|f| render_result(f, f.area(), state))
            .expect("renders");
    }

    #[test]
    fn test_overlarge_probability_renders_without_panic() {
        draw(&ResultState::Complete {
            assessment: Assessment::new(PredictionResult {
                status: "success".to_string(),
                prediction: 1,
                probability: 1.5,
                message: None,
            }),
        });
    }

    #[test]
    fn test_negative_probability_renders_without_panic() {
        draw(&ResultState::Complete {
            assessment: Assessment::new(PredictionResult {
                status: "success".to_string(),
                prediction: 0,
                probability: -0.2,
                message: None,
            }),
        });
    }

    #[test]
    fn test_all_states_render() {
        draw(&ResultState::Idle);
        draw(&ResultState::Submitting { progress: 0.5 });
        draw(&ResultState::Complete {
            assessment: Assessment::new(PredictionResult::network_error("connection refused")),
        });
    }
}
