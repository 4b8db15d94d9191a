//! Record shapes and their validation
//!
//! # Design Principles
//!
//! - Every record and request body has one declarative field table
//! - Validation reports all violated fields at once
//! - Typed records are only built from validated input
//! - No side effects

mod errors;
mod primitives;
mod signal;
mod subscriber;
mod types;
mod validator;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use errors::{ValidationError, ValidationResult, Violation};
pub use primitives::{Confidence, EmailAddress};
pub use signal::{
    Action, Signal, SignalCreateRequest, Symbol, DEFAULT_TIMEFRAME, SIGNAL_CREATE_SCHEMA,
    SIGNAL_SCHEMA,
};
pub use subscriber::{
    Plan, SubscribeRequest, Subscriber, SubscriptionStatus, SUBSCRIBER_SCHEMA,
    SUBSCRIBE_REQUEST_SCHEMA,
};
pub use types::{FieldDef, FieldType, Schema};
pub use validator::SchemaValidator;

/// A typed shape backed by a field table.
pub trait Model: DeserializeOwned {
    /// The field table this type is validated against
    fn schema() -> &'static Schema;

    /// Validates untrusted JSON and builds the typed value.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing every violated field.
    fn from_json(input: &Value) -> ValidationResult<Self> {
        let schema = Self::schema();
        let resolved = SchemaValidator::new(schema).validate(input)?;

        // The field table and the serde shape agree, so this only fails if
        // they drift apart.
        serde_json::from_value(Value::Object(resolved)).map_err(|e| {
            ValidationError::single(
                schema.name,
                Violation::new("$root", format!("valid {}", schema.name), e.to_string()),
            )
        })
    }
}
