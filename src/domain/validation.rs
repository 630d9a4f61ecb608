//! Per-field validation error mapping shared by all forms.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Maps field names to human-readable error messages.
///
/// An empty mapping means every rule passed. Submission must be blocked
/// entirely while the mapping is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Remove the error for a field, if any. Called when the field is edited.
    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Join all messages into a single line (for logs and fallback display).
    #[must_use]
    pub fn summary(&self) -> String {
        self.0
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();

/// Check the `text@text.text` shape used for login and registration.
///
/// Intentionally loose: the stub auth backend accepts anything shaped like
/// an address, so there is no point in a full RFC 5322 matcher here.
#[must_use]
pub fn is_valid_email(input: &str) -> bool {
    let re = EMAIL_SHAPE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("Valid regex"));
    re.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mapping_by_default() {
        let errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_insert_and_remove_on_edit() {
        let mut errors = ValidationErrors::new();
        errors.insert("age", "Age must be between 1 and 120");
        assert_eq!(errors.get("age"), Some("Age must be between 1 and 120"));
        assert!(!errors.is_empty());

        errors.remove("age");
        assert!(errors.get("age").is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@clinic.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email(""));
    }
}
