//! Schema validator for untyped JSON input
//!
//! Validation semantics:
//! - Every declared field is checked; all violations are collected
//! - Missing keys take the field default, or are reported when required
//! - Explicit nulls are accepted only for nullable fields
//! - Field types are matched without coercion, except that float fields
//!   accept ints and int fields accept floats with no fractional part
//! - Undeclared keys are dropped from the resolved output
//!
//! The validator does not mutate its input.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::errors::{ValidationError, ValidationResult, Violation};
use super::primitives::EmailAddress;
use super::types::{FieldDef, FieldType, Schema};

/// Checks JSON objects against one schema.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates `input` and returns the resolved object: declared keys
    /// only, defaults applied.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing every violated field.
    pub fn validate(&self, input: &Value) -> ValidationResult<Map<String, Value>> {
        let obj = input.as_object().ok_or_else(|| {
            ValidationError::single(
                self.schema.name,
                Violation::type_mismatch("$root", "object", json_type_name(input)),
            )
        })?;

        let mut resolved = Map::new();
        let mut violations = Vec::new();

        for field in self.schema.fields {
            match obj.get(field.name) {
                Some(Value::Null) => {
                    if field.nullable {
                        resolved.insert(field.name.to_string(), Value::Null);
                    } else {
                        violations.push(Violation::null_value(field.name));
                    }
                }
                Some(value) => match check_value(field, value) {
                    Ok(checked) => {
                        resolved.insert(field.name.to_string(), checked);
                    }
                    Err(violation) => violations.push(violation),
                },
                None => {
                    if let Some(default) = field.default {
                        resolved.insert(field.name.to_string(), Value::from(default));
                    } else if field.required {
                        violations.push(Violation::missing_field(field.name));
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(resolved)
        } else {
            Err(ValidationError::new(self.schema.name, violations))
        }
    }
}

/// Checks a non-null value against a field's type and bounds and returns
/// the value to resolve it to.
fn check_value(field: &FieldDef, value: &Value) -> Result<Value, Violation> {
    let name = field.name;
    match field.field_type {
        FieldType::String => {
            if !value.is_string() {
                return Err(type_error(name, "string", value));
            }
        }
        FieldType::Email => {
            let s = value
                .as_str()
                .ok_or_else(|| type_error(name, "email string", value))?;
            EmailAddress::parse(s)
                .map_err(|reason| Violation::new(name, "valid email address", reason))?;
        }
        FieldType::Float => {
            // Accept both integers and floats as float
            if !value.is_number() {
                return Err(type_error(name, "float", value));
            }
        }
        FieldType::Int { min, max } => {
            let n = as_integer(value).ok_or_else(|| type_error(name, "int", value))?;
            let out_of_range = match n {
                Some(n) => min.is_some_and(|min| n < min) || max.is_some_and(|max| n > max),
                None => min.is_some() || max.is_some(),
            };
            if out_of_range {
                return Err(Violation::new(name, describe_range(min, max), value.to_string()));
            }
            // 80.0 resolves to 80
            return Ok(n.map(Value::from).unwrap_or_else(|| value.clone()));
        }
        FieldType::Enum(literals) => {
            let s = value
                .as_str()
                .ok_or_else(|| type_error(name, "string literal", value))?;
            if !literals.contains(&s) {
                return Err(Violation::new(
                    name,
                    format!("one of [{}]", literals.join(", ")),
                    format!("'{}'", s),
                ));
            }
        }
        FieldType::Timestamp => {
            let s = value
                .as_str()
                .ok_or_else(|| type_error(name, "ISO-8601 timestamp", value))?;
            s.parse::<DateTime<Utc>>()
                .map_err(|e| Violation::new(name, "ISO-8601 timestamp", e.to_string()))?;
        }
    }
    Ok(value.clone())
}

/// Integer value of a JSON number. Floats count when they have no
/// fractional part. `Some(None)` is an integer outside the `i64` range.
fn as_integer(value: &Value) -> Option<Option<i64>> {
    let Value::Number(n) = value else {
        return None;
    };
    if n.is_i64() || n.is_u64() {
        return Some(n.as_i64());
    }
    let f = n.as_f64().filter(|f| f.fract() == 0.0)?;
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Some(f as i64))
    } else {
        Some(None)
    }
}

fn describe_range(min: Option<i64>, max: Option<i64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("int in [{}, {}]", min, max),
        (Some(min), None) => format!("int >= {}", min),
        (None, Some(max)) => format!("int <= {}", max),
        (None, None) => "int".to_string(),
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(field: &str, expected: &str, actual: &Value) -> Violation {
    Violation::type_mismatch(field, expected, json_type_name(actual))
}
