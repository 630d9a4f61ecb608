//! Clinical intake form: ten raw fields, range validation, wire coercion.
//!
//! Field names follow the UCI heart-disease feature set expected by the
//! prediction endpoint: age, sex, cp, trestbps, chol, fbs, restecg,
//! thalch, exang, oldpeak.

use serde::{Deserialize, Serialize};

use super::validation::ValidationErrors;

/// Raw intake data as entered in the TUI.
///
/// Every field is held as a string until [`IntakeForm::validate`] passes;
/// categorical fields store the selected integer code as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    /// Age in years (1-120)
    pub age: String,
    /// Sex: 0 = female, 1 = male
    pub sex: String,
    /// Chest pain type: 0-3
    pub cp: String,
    /// Resting blood pressure in mmHg (50-300)
    pub trestbps: String,
    /// Serum cholesterol in mg/dl (100-600)
    pub chol: String,
    /// Fasting blood sugar > 120 mg/dl: 0 = no, 1 = yes
    pub fbs: String,
    /// Resting ECG result: 0-2
    pub restecg: String,
    /// Maximum heart rate achieved in bpm (60-220)
    pub thalch: String,
    /// Exercise-induced angina: 0 = no, 1 = yes
    pub exang: String,
    /// ST depression induced by exercise (0-10, decimal)
    pub oldpeak: String,
}

/// Validated numeric payload for `POST /predict`.
///
/// All ten values are floats, including the coerced categorical codes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub age: f64,
    pub sex: f64,
    pub cp: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: f64,
    pub restecg: f64,
    pub thalch: f64,
    pub exang: f64,
    pub oldpeak: f64,
}

/// Integer-styled fields validate on the truncated value, so "54.7" passes
/// the age gate as 54 while the request still carries 54.7. An unparseable
/// string is treated as out of range.
fn int_in_range(raw: &str, min: f64, max: f64) -> bool {
    match raw.trim().parse::<f64>() {
        Ok(value) => {
            let truncated = value.trunc();
            truncated >= min && truncated <= max
        }
        Err(_) => false,
    }
}

fn decimal_in_range(raw: &str, min: f64, max: f64) -> bool {
    match raw.trim().parse::<f64>() {
        Ok(value) => value >= min && value <= max,
        Err(_) => false,
    }
}

/// Coerce a validated field to its wire value.
fn coerce(raw: &str) -> f64 {
    // Fields reaching this point have passed validation, so the parse
    // cannot fail; default keeps the function total.
    raw.trim().parse().unwrap_or_default()
}

impl IntakeForm {
    /// Validate every field against the clinical range table.
    ///
    /// Returns an empty mapping iff every rule passes; otherwise each
    /// failing field maps to its fixed, field-specific message.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.age.trim().is_empty() || !int_in_range(&self.age, 1.0, 120.0) {
            errors.insert("age", "Age must be between 1 and 120");
        }
        if self.trestbps.trim().is_empty() || !int_in_range(&self.trestbps, 50.0, 300.0) {
            errors.insert("trestbps", "Blood pressure must be between 50-300 mmHg");
        }
        if self.chol.trim().is_empty() || !int_in_range(&self.chol, 100.0, 600.0) {
            errors.insert("chol", "Cholesterol must be between 100-600 mg/dl");
        }
        if self.thalch.trim().is_empty() || !int_in_range(&self.thalch, 60.0, 220.0) {
            errors.insert("thalch", "Heart rate must be between 60-220 bpm");
        }
        if self.oldpeak.trim().is_empty() || !decimal_in_range(&self.oldpeak, 0.0, 10.0) {
            errors.insert("oldpeak", "ST Depression must be between 0-10");
        }

        // Categorical selections: a choice must have been made.
        for (name, value) in [
            ("sex", &self.sex),
            ("cp", &self.cp),
            ("fbs", &self.fbs),
            ("restecg", &self.restecg),
            ("exang", &self.exang),
        ] {
            if value.trim().is_empty() {
                errors.insert(name, "This field is required");
            }
        }

        errors
    }

    /// Coerce the form into the numeric wire payload.
    ///
    /// # Errors
    /// Returns the full error mapping when any rule fails; no partial
    /// payload is ever produced.
    pub fn to_request(&self) -> Result<PredictionRequest, ValidationErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PredictionRequest {
            age: coerce(&self.age),
            sex: coerce(&self.sex),
            cp: coerce(&self.cp),
            trestbps: coerce(&self.trestbps),
            chol: coerce(&self.chol),
            fbs: coerce(&self.fbs),
            restecg: coerce(&self.restecg),
            thalch: coerce(&self.thalch),
            exang: coerce(&self.exang),
            oldpeak: coerce(&self.oldpeak),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_numeric_bounds_produce_fixed_messages() {
        let cases: [(&str, fn(&mut IntakeForm) -> &mut String, &str, &str, &str); 5] = [
            ("age", |f| &mut f.age, "0", "121", "Age must be between 1 and 120"),
            (
                "trestbps",
                |f| &mut f.trestbps,
                "49",
                "301",
                "Blood pressure must be between 50-300 mmHg",
            ),
            (
                "chol",
                |f| &mut f.chol,
                "99",
                "601",
                "Cholesterol must be between 100-600 mg/dl",
            ),
            (
                "thalch",
                |f| &mut f.thalch,
                "59",
                "221",
                "Heart rate must be between 60-220 bpm",
            ),
            (
                "oldpeak",
                |f| &mut f.oldpeak,
                "-0.1",
                "10.1",
                "ST Depression must be between 0-10",
            ),
        ];

        for (field, access, below, above, message) in cases {
            for bad in [below, above, ""] {
                let mut form = valid_form();
                *access(&mut form) = bad.to_string();
                let errors = form.validate();
                assert_eq!(errors.get(field), Some(message), "{field}={bad:?}");
                assert_eq!(errors.len(), 1);
            }
        }
    }

    #[test]
    fn test_inclusive_bounds_accept_edge_values() {
        for (access, value) in [
            ((|f: &mut IntakeForm| &mut f.age) as fn(&mut IntakeForm) -> &mut String, "1"),
            (|f: &mut IntakeForm| &mut f.age, "120"),
            (|f: &mut IntakeForm| &mut f.trestbps, "50"),
            (|f: &mut IntakeForm| &mut f.trestbps, "300"),
            (|f: &mut IntakeForm| &mut f.chol, "100"),
            (|f: &mut IntakeForm| &mut f.chol, "600"),
            (|f: &mut IntakeForm| &mut f.thalch, "60"),
            (|f: &mut IntakeForm| &mut f.thalch, "220"),
            (|f: &mut IntakeForm| &mut f.oldpeak, "0"),
            (|f: &mut IntakeForm| &mut f.oldpeak, "10"),
        ] {
            let mut form = valid_form();
            *access(&mut form) = value.to_string();
            assert!(form.validate().is_empty(), "edge value {value} rejected");
        }
    }

    #[test]
    fn test_unparseable_numeric_is_out_of_range() {
        let mut form = valid_form();
        form.age = "abc".to_string();
        let errors = form.validate();
        assert_eq!(errors.get("age"), Some("Age must be between 1 and 120"));
    }

    #[test]
    fn test_missing_categorical_selection() {
        let mut form = valid_form();
        form.sex.clear();
        form.restecg = "  ".to_string();
        let errors = form.validate();
        assert_eq!(errors.get("sex"), Some("This field is required"));
        assert_eq!(errors.get("restecg"), Some("This field is required"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_coercion_round_trip() {
        let mut form = valid_form();
        form.age = "54.7".to_string();
        form.oldpeak = "2.3".to_string();

        let request = form.to_request().expect("valid form coerces");
        assert!((request.age - 54.7).abs() < f64::EPSILON);
        assert!((request.sex - 1.0).abs() < f64::EPSILON);
        assert!((request.trestbps - 130.0).abs() < f64::EPSILON);
        assert!((request.oldpeak - 2.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_form_yields_full_mapping() {
        let form = IntakeForm::default();
        let errors = form.to_request().expect_err("empty form must not coerce");
        assert_eq!(errors.len(), 10);
    }

    #[test]
    fn test_request_wire_keys() {
        let request = valid_form().to_request().expect("valid form");
        let json = serde_json::to_value(request).expect("serializes");
        let object = json.as_object().expect("object");
        for key in [
            "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalch", "exang",
            "oldpeak",
        ] {
            assert!(object.get(key).and_then(|v| v.as_f64()).is_some(), "{key}");
        }
        assert_eq!(object.len(), 10);
    }
}
