//! Validation rules for record fields

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub digits_only: bool,
    pub custom_error: Option<&'static str>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            digits_only: false,
            custom_error: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn with_max_length(self, max: usize) -> Self {
        Self {
            max_length: Some(max),
            ..self
        }
    }

    pub const fn with_min_length(self, min: usize) -> Self {
        Self {
            min_length: Some(min),
            ..self
        }
    }

    pub const fn with_exact_length(self, len: usize) -> Self {
        Self {
            min_length: Some(len),
            max_length: Some(len),
            ..self
        }
    }

    pub const fn with_range(self, min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..self
        }
    }

    pub const fn with_min(self, min: f64) -> Self {
        Self {
            min: Some(min),
            ..self
        }
    }

    pub const fn digits(self) -> Self {
        Self {
            digits_only: true,
            ..self
        }
    }

    pub const fn with_error(self, message: &'static str) -> Self {
        Self {
            custom_error: Some(message),
            ..self
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    fn fail(&self, fallback: String) -> Result<(), String> {
        Err(self.custom_error.map(str::to_string).unwrap_or(fallback))
    }

    /// Validate a string value against the rules.
    /// An empty optional value passes without further checks.
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            if self.required {
                return Err(format!("{} is required", field_label));
            }
            return Ok(());
        }

        let len = trimmed.chars().count();
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min == max && len != min => {
                return self.fail(format!("{} must be exactly {} characters", field_label, min));
            }
            (Some(min), _) if len < min => {
                return self.fail(format!("{} must be at least {} characters", field_label, min));
            }
            (_, Some(max)) if len > max => {
                return self.fail(format!("{} must not exceed {} characters", field_label, max));
            }
            _ => {}
        }

        if self.digits_only && !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return self.fail(format!("{} must contain digits only", field_label));
        }

        Ok(())
    }

    /// Validate an optional string; `None` behaves like an empty input.
    pub fn validate_optional(&self, value: Option<&str>, field_label: &str) -> Result<(), String> {
        self.validate_string(value.unwrap_or_default(), field_label)
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a number", field_label));
        }

        if let Some(min) = self.min {
            if value < min {
                return self.fail(format!("{} must be at least {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return self.fail(format!("{} must be at most {}", field_label, max));
            }
        }

        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` date entered on a form.
pub fn parse_date(value: &str, field_label: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("{} must be a date (YYYY-MM-DD)", field_label))
}

/// Error attached to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field errors; the order is the order fields were checked,
/// which is also the order they appear on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; a field keeps only its first message.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    /// Record the outcome of a rule check.
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_field(&self) -> Option<&str> {
        self.errors.first().map(|e| e.field.as_str())
    }

    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first_message().unwrap_or("Validation failed"))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: ValidationRules = ValidationRules::required().with_exact_length(8);

    #[test]
    fn test_required_string() {
        assert_eq!(
            ValidationRules::required().validate_string("  ", "Name"),
            Err("Name is required".to_string())
        );
        assert!(ValidationRules::none().validate_string("", "Name").is_ok());
    }

    #[test]
    fn test_exact_length() {
        assert!(CODE.validate_string("IGIS0001", "Code").is_ok());
        assert_eq!(
            CODE.validate_string("IGIS01", "Code"),
            Err("Code must be exactly 8 characters".to_string())
        );
    }

    #[test]
    fn test_digits_only_and_custom_error() {
        let cnic = ValidationRules::required()
            .with_exact_length(13)
            .digits()
            .with_error("CNIC must be 13 digits");
        assert!(cnic.validate_string("3520212345671", "CNIC").is_ok());
        assert_eq!(
            cnic.validate_string("35202-1234567", "CNIC"),
            Err("CNIC must be 13 digits".to_string())
        );
    }

    #[test]
    fn test_number_range() {
        let rate = ValidationRules::required().with_range(0.0, 100.0);
        assert!(rate.validate_number(12.5, "Commission").is_ok());
        assert_eq!(
            rate.validate_number(120.0, "Commission"),
            Err("Commission must be at most 100".to_string())
        );
        assert!(rate.validate_number(f64::NAN, "Commission").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-01-31", "Valid from").is_ok());
        assert_eq!(
            parse_date("31/01/2026", "Valid from"),
            Err("Valid from must be a date (YYYY-MM-DD)".to_string())
        );
    }

    #[test]
    fn test_errors_keep_first_message_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name is required");
        errors.add("name", "Name is too long");
        errors.check("code", Err("Code is required".into()));
        errors.check("city", Ok(()));

        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.first_field(), Some("name"));
        assert!(errors.into_result().is_err());
    }
}
