//! Input validation
//!
//! Provides a fluent [`Validator`] plus the domain rules applied before
//! anything is written to the taxonomy or location stores:
//! - State and city names must be non-empty
//! - State codes (UF) are two ASCII letters, normalized to uppercase
//! - Latitude lies in [-90, 90] and longitude in [-180, 180], both finite
//!
//! # Example
//!
//! ```rust
//! use geocatalog_core::validation::{validate_location, Validator};
//!
//! let result = Validator::new()
//!     .required("name", "Praça da Sé")
//!     .range("radius", 5.0, 0.0, 100.0)
//!     .validate();
//! assert!(result.is_valid());
//!
//! let result = validate_location("Farol", "Recife", "PE", 100.0, -34.8);
//! assert!(!result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static UF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("UF pattern is a valid regex"));

/// Which check produced a [`Violation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Blank text
    Required,
    /// Regex mismatch
    Pattern,
    /// Number outside bounds or not finite
    Range,
    /// Caller-supplied check
    Custom,
    /// Suspicious but accepted
    Suspicious,
}

/// A failed or suspicious field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Field name as the caller spelled it
    pub field: String,
    /// Check that fired
    pub rule: Rule,
    /// What is wrong
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors block a write, warnings only get logged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    errors: Vec<Violation>,
    warnings: Vec<Violation>,
}

impl ValidationResult {
    /// True when there are no errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Blocking violations
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// Non-blocking violations
    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }

    /// Errors joined with `; `
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Err` carrying the summary when there are errors
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::new(
                ErrorCode::Validation,
                format!("Validation failed: {}", self.summary()),
            ))
        }
    }
}

/// Chainable field checks
#[derive(Debug, Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Empty validator
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(mut self, field: &str, rule: Rule, message: impl Into<String>) -> Self {
        let violation = Violation {
            field: field.to_string(),
            rule,
            message: message.into(),
        };
        if rule == Rule::Suspicious {
            self.result.warnings.push(violation);
        } else {
            self.result.errors.push(violation);
        }
        self
    }

    /// Text must not be blank
    pub fn required(self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            return self.fail(field, Rule::Required, "Field is required");
        }
        self
    }

    /// Text must match `re`
    pub fn matches(self, field: &str, value: &str, re: &Regex, description: &str) -> Self {
        if !re.is_match(value) {
            let message = format!("Must be a {}, got '{}'", description, value);
            return self.fail(field, Rule::Pattern, message);
        }
        self
    }

    /// Number must be finite and in `[min, max]`
    pub fn range(self, field: &str, value: f64, min: f64, max: f64) -> Self {
        if !value.is_finite() || value < min || value > max {
            let message = format!("Must be between {} and {}, got {}", min, max, value);
            return self.fail(field, Rule::Range, message);
        }
        self
    }

    /// Fails with the returned message, if any
    pub fn custom<F>(self, field: &str, check: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        match check() {
            Some(message) => self.fail(field, Rule::Custom, message),
            None => self,
        }
    }

    /// Records a warning when `condition` holds
    pub fn warn_if(self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            return self.fail(field, Rule::Suspicious, message);
        }
        self
    }

    /// Finish
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Trim and uppercase a state code
pub fn normalize_uf(uf: &str) -> String {
    uf.trim().to_uppercase()
}

/// Rules for a new state row. `uf` is checked after normalization.
pub fn validate_state(name: &str, uf: &str) -> ValidationResult {
    Validator::new()
        .required("name", name)
        .matches("uf", &normalize_uf(uf), &UF_PATTERN, "two-letter state code")
        .validate()
}

/// Rules for a new city row
pub fn validate_city(name: &str, uf: &str) -> ValidationResult {
    Validator::new()
        .required("name", name)
        .matches("state_uf", &normalize_uf(uf), &UF_PATTERN, "two-letter state code")
        .validate()
}

/// Rules for a new location document
pub fn validate_location(
    name: &str,
    city: &str,
    state: &str,
    latitude: f64,
    longitude: f64,
) -> ValidationResult {
    Validator::new()
        .required("name", name)
        .required("city", city)
        .matches("state", &normalize_uf(state), &UF_PATTERN, "two-letter state code")
        .range("latitude", latitude, -90.0, 90.0)
        .range("longitude", longitude, -180.0, 180.0)
        .warn_if(
            "coordinates",
            latitude == 0.0 && longitude == 0.0,
            "Coordinates are exactly (0, 0); check the input",
        )
        .validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("name", "   ").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].rule, Rule::Required);
    }

    #[test]
    fn test_range_rejects_nan() {
        let result = Validator::new().range("lat", f64::NAN, -90.0, 90.0).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].rule, Rule::Range);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let result = Validator::new()
            .range("lat", 90.0, -90.0, 90.0)
            .range("lon", -180.0, -180.0, 180.0)
            .validate();
        assert!(result.is_valid());
    }

    #[test]
    fn test_custom_validation() {
        let result = Validator::new()
            .custom("radius", || Some("negative".to_string()))
            .validate();
        assert_eq!(result.errors()[0].rule, Rule::Custom);
    }

    #[test]
    fn test_to_result_message() {
        let err = Validator::new()
            .required("name", "")
            .validate()
            .to_result()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
        assert!(err.message.contains("name: Field is required"));
    }

    #[test]
    fn test_normalize_uf() {
        assert_eq!(normalize_uf(" sp "), "SP");
    }

    #[test]
    fn test_validate_state() {
        assert!(validate_state("Pernambuco", "pe").is_valid());
        assert!(!validate_state("", "SP").is_valid());
        assert!(!validate_state("Nowhere", "ZZZ").is_valid());
        assert!(!validate_state("Digits", "1A").is_valid());
    }

    #[test]
    fn test_validate_city() {
        assert!(validate_city("Recife", "PE").is_valid());
        assert!(!validate_city("  ", "PE").is_valid());
    }

    #[test]
    fn test_validate_location_out_of_range() {
        let result = validate_location("Farol", "Recife", "PE", 100.0, -34.8);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].field, "latitude");
    }

    #[test]
    fn test_validate_location_missing_fields() {
        let result = validate_location("", "", "", -8.05, -34.9);
        assert_eq!(result.errors().len(), 3);
    }

    #[test]
    fn test_validate_location_origin_warning() {
        let result = validate_location("Null Island", "Atlantic", "AT", 0.0, 0.0);
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(result.warnings()[0].rule, Rule::Suspicious);
    }

    #[test]
    fn test_pattern_message_names_value() {
        let result = validate_state("Nowhere", "zzz");
        assert_eq!(result.summary(), "uf: Must be a two-letter state code, got 'ZZZ'");
    }
}
