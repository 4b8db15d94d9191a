//! Schema validation errors
//!
//! A `ValidationError` carries every violated field of one input, so a
//! caller can report all problems at once.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// One violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field path (e.g., "confidence", or "$root" for the whole input)
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Input failed one or more schema constraints
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation error(s) for {schema}: {}", .violations.len(), join(.violations))]
pub struct ValidationError {
    /// Schema the input was checked against
    pub schema: &'static str,
    /// Every violated field, in schema declaration order
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(schema: &'static str, violations: Vec<Violation>) -> Self {
        Self { schema, violations }
    }

    /// Single-violation error
    pub fn single(schema: &'static str, violation: Violation) -> Self {
        Self::new(schema, vec![violation])
    }

    /// Whether `field` is among the violated fields
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for schema operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display() {
        let v = Violation::type_mismatch("confidence", "int", "string");
        let display = v.to_string();
        assert!(display.contains("confidence"));
        assert!(display.contains("int"));
        assert!(display.contains("string"));
    }

    #[test]
    fn test_error_lists_every_violation() {
        let err = ValidationError::new(
            "signal",
            vec![
                Violation::missing_field("action"),
                Violation::new("confidence", "int in [0, 100]", "101"),
            ],
        );
        let display = err.to_string();
        assert!(display.starts_with("2 validation error(s) for signal"));
        assert!(display.contains("action"));
        assert!(display.contains("confidence"));
        assert!(err.has_field("action"));
        assert!(!err.has_field("entry"));
    }
}
