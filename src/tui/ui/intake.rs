//! Clinical intake form: ten fields over two columns.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{IntakeForm, ValidationErrors};
use crate::tui::styles::HeartTheme;

/// How a field collects its value.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free numeric entry with a range hint
    Numeric { hint: &'static str },
    /// Fixed coded options, cycled with Left/Right: (code, label)
    Choice {
        options: &'static [(&'static str, &'static str)],
    },
}

/// Form field definition.
#[derive(Debug, Clone)]
pub struct FormField {
    /// Wire name; keys the validation error mapping
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Raw value; for choices, the selected code
    pub value: String,
    pub error: Option<String>,
}

impl FormField {
    /// Text shown in the field box: labels for choices, raw value otherwise.
    #[must_use]
    pub fn display_value(&self) -> Option<&'static str> {
        match &self.kind {
            FieldKind::Numeric { .. } => None,
            FieldKind::Choice { options } => options
                .iter()
                .find(|(code, _)| *code == self.value)
                .map(|(_, label)| *label),
        }
    }

    fn hint(&self) -> &'static str {
        match &self.kind {
            FieldKind::Numeric { hint } => hint,
            FieldKind::Choice { .. } => "←/→ to choose",
        }
    }
}

/// Intake form state.
pub struct IntakeFormState {
    pub fields: Vec<FormField>,
    pub selected: usize,
}

impl Default for IntakeFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField {
                    name: "age",
                    label: "Age",
                    kind: FieldKind::Numeric {
                        hint: "years (1-120)",
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "sex",
                    label: "Sex",
                    kind: FieldKind::Choice {
                        options: &[("0", "Female"), ("1", "Male")],
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "cp",
                    label: "Chest Pain Type",
                    kind: FieldKind::Choice {
                        options: &[
                            ("0", "Typical Angina"),
                            ("1", "Atypical Angina"),
                            ("2", "Non-Anginal Pain"),
                            ("3", "Asymptomatic"),
                        ],
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "trestbps",
                    label: "Resting BP",
                    kind: FieldKind::Numeric {
                        hint: "mmHg (50-300)",
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "chol",
                    label: "Cholesterol",
                    kind: FieldKind::Numeric {
                        hint: "mg/dl (100-600)",
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "fbs",
                    label: "Fasting Blood Sugar",
                    kind: FieldKind::Choice {
                        options: &[("0", "< 120 mg/dl (Normal)"), ("1", "> 120 mg/dl (High)")],
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "restecg",
                    label: "Resting ECG",
                    kind: FieldKind::Choice {
                        options: &[
                            ("0", "Normal"),
                            ("1", "ST-T Wave Abnormality"),
                            ("2", "Left Ventricular Hypertrophy"),
                        ],
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "thalch",
                    label: "Max Heart Rate",
                    kind: FieldKind::Numeric {
                        hint: "bpm (60-220)",
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "exang",
                    label: "Exercise Angina",
                    kind: FieldKind::Choice {
                        options: &[("0", "No"), ("1", "Yes")],
                    },
                    value: String::new(),
                    error: None,
                },
                FormField {
                    name: "oldpeak",
                    label: "ST Depression",
                    kind: FieldKind::Numeric {
                        hint: "e.g. 1.5 (0-10)",
                    },
                    value: String::new(),
                    error: None,
                },
            ],
            selected: 0,
        }
    }
}

impl IntakeFormState {
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = self.fields.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Type into the selected field. Numeric fields accept digits and a
    /// decimal point; choice fields accept a digit naming an option code.
    /// Any accepted edit clears the field's error.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected];
        match &field.kind {
            FieldKind::Numeric { .. } => {
                if c.is_ascii_digit() || c == '.' {
                    field.value.push(c);
                    field.error = None;
                }
            }
            FieldKind::Choice { options } => {
                let mut code = [0u8; 4];
                let code = &*c.encode_utf8(&mut code);
                if options.iter().any(|(option, _)| *option == code) {
                    field.value = code.to_string();
                    field.error = None;
                }
            }
        }
    }

    /// Cycle the selected choice field (no-op on numeric fields).
    pub fn cycle_choice(&mut self, step: i64) {
        let field = &mut self.fields[self.selected];
        if let FieldKind::Choice { options } = &field.kind {
            let len = options.len() as i64;
            let current = options
                .iter()
                .position(|(code, _)| *code == field.value)
                .map_or(-1, |i| i as i64);
            let next = (current + step).rem_euclid(len);
            field.value = options[next as usize].0.to_string();
            field.error = None;
        }
    }

    /// Delete the last character of the selected field.
    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.selected];
        match &field.kind {
            FieldKind::Numeric { .. } => {
                field.value.pop();
            }
            FieldKind::Choice { .. } => field.value.clear(),
        }
        field.error = None;
    }

    /// Clear the selected field entirely.
    pub fn clear_field(&mut self) {
        let field = &mut self.fields[self.selected];
        field.value.clear();
        field.error = None;
    }

    /// Load a sample patient (typical intake for a quick demo).
    pub fn load_sample_data(&mut self) {
        let sample = ["54", "1", "0", "130", "246", "0", "1", "150", "0", "1.0"];
        for (field, value) in self.fields.iter_mut().zip(sample) {
            field.value = value.to_string();
            field.error = None;
        }
    }

    /// Snapshot the raw values into the domain form.
    #[must_use]
    pub fn to_form(&self) -> IntakeForm {
        let mut form = IntakeForm::default();
        for field in &self.fields {
            let slot = match field.name {
                "age" => &mut form.age,
                "sex" => &mut form.sex,
                "cp" => &mut form.cp,
                "trestbps" => &mut form.trestbps,
                "chol" => &mut form.chol,
                "fbs" => &mut form.fbs,
                "restecg" => &mut form.restecg,
                "thalch" => &mut form.thalch,
                "exang" => &mut form.exang,
                _ => &mut form.oldpeak,
            };
            slot.clone_from(&field.value);
        }
        form
    }

    /// Attach validation errors to their fields.
    pub fn apply_errors(&mut self, errors: &ValidationErrors) {
        for field in &mut self.fields {
            field.error = errors.get(field.name).map(str::to_string);
        }
    }

    /// Error of the selected field, if any (shown in the footer).
    #[must_use]
    pub fn selected_error(&self) -> Option<&str> {
        self.fields[self.selected].error.as_deref()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.error.is_some()).count()
    }
}

/// Render the intake form.
pub fn render_intake(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("Patient Information", HeartTheme::title()),
        Span::styled(
            " │ Cardiovascular risk intake",
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

fn render_form_fields(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected);
    render_field_column(f, columns[1], &state.fields[mid..], mid, state.selected);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;

        let border_style = if field.error.is_some() {
            HeartTheme::danger()
        } else if is_selected {
            HeartTheme::border_focused()
        } else {
            HeartTheme::border()
        };

        let title_style = if is_selected {
            HeartTheme::focused()
        } else {
            HeartTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let shown = field.display_value().map(str::to_string);
        let value_display = match shown {
            Some(label) => Span::styled(label, HeartTheme::text()),
            None if field.value.is_empty() => {
                Span::styled(field.hint(), HeartTheme::text_muted())
            }
            None => Span::styled(field.value.clone(), HeartTheme::text()),
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", HeartTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &IntakeFormState) {
    let content = if let Some(err) = state.selected_error() {
        Line::from(vec![
            Span::styled("! ", HeartTheme::danger()),
            Span::styled(err.to_string(), HeartTheme::danger()),
        ])
    } else if state.error_count() > 0 {
        Line::from(Span::styled(
            format!(
                "Please fill in all fields correctly ({} to fix)",
                state.error_count()
            ),
            HeartTheme::danger(),
        ))
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", HeartTheme::key_hint()),
            Span::styled("Navigate ", HeartTheme::key_desc()),
            Span::styled("[←→] ", HeartTheme::key_hint()),
            Span::styled("Choose ", HeartTheme::key_desc()),
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled("Predict Risk ", HeartTheme::key_desc()),
            Span::styled("[S] ", HeartTheme::key_hint()),
            Span::styled("Sample ", HeartTheme::key_desc()),
            Span::styled("[L] ", HeartTheme::key_hint()),
            Span::styled("Logout", HeartTheme::key_desc()),
        ])
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

    #[test]
    fn test_numeric_input_filters_characters() {
        let mut state = IntakeFormState::default();
        state.input_char('5');
        state.input_char('x');
        state.input_char('4');
        assert_eq!(state.fields[0].value, "54");
    }

    #[test]
    fn test_choice_accepts_only_known_codes() {
        let mut state = IntakeFormState::default();
        state.selected = 1; // sex: codes 0 and 1
        state.input_char('7');
        assert!(state.fields[1].value.is_empty());
        state.input_char('1');
        assert_eq!(state.fields[1].value, "1");
        assert_eq!(state.fields[1].display_value(), Some("Male"));
    }

    #[test]
    fn test_choice_cycles_and_wraps() {
        let mut state = IntakeFormState::default();
        state.selected = 2; // cp: four options
        state.cycle_choice(1);
        assert_eq!(state.fields[2].value, "0");
        state.cycle_choice(-1);
        assert_eq!(state.fields[2].value, "3");
        state.cycle_choice(1);
        assert_eq!(state.fields[2].value, "0");
    }

    #[test]
    fn test_edit_clears_error() {
        let mut state = IntakeFormState::default();
        let mut errors = ValidationErrors::new();
        errors.insert("age", "Age must be between 1 and 120");
        state.apply_errors(&errors);
        assert_eq!(state.selected_error(), Some("Age must be between 1 and 120"));

        state.input_char('5');
        assert!(state.selected_error().is_none());
    }

    #[test]
    fn test_sample_form_is_valid() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();
        assert!(state.to_form().validate().is_empty());
    }

    #[test]
    fn test_to_form_maps_all_fields() {
        let mut state = IntakeFormState::default();
        state.load_sample_data();
        let form = state.to_form();
        assert_eq!(form.age, "54");
        assert_eq!(form.chol, "246");
        assert_eq!(form.oldpeak, "1.0");
    }
}
