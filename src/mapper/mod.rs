//! # Document Mapper
//!
//! The single translation boundary between typed records and untyped store
//! documents. Raw documents never travel past this module.
//!
//! Outbound (record -> document):
//! - every schema field becomes an entry, absent optionals as null
//! - timestamps become native temporal values, or ISO-8601 strings when
//!   the store has no temporal type
//!
//! Inbound (document -> record):
//! 1. drop the store identifier
//! 2. render temporal values as ISO-8601 strings
//! 3. discard keys the schema does not declare
//! 4. validate and build the record, defaults filling absent optionals

mod errors;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::schema::{FieldDef, FieldType, Model, Signal, Subscriber};
use crate::store::document::{iso8601, ID_FIELD};
use crate::store::{DocValue, Document, DocumentStore};

pub use errors::{MappingError, MappingResult};

/// A record persisted in its own collection.
pub trait Stored: Model + Serialize {
    /// Collection holding documents of this record type
    const COLLECTION: &'static str;
}

impl Stored for Subscriber {
    const COLLECTION: &'static str = "subscriber";
}

impl Stored for Signal {
    const COLLECTION: &'static str = "signal";
}

/// How timestamps are embedded in outbound documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalEncoding {
    /// The store's own temporal value
    Native,
    /// RFC 3339 strings
    Iso8601,
}

impl TemporalEncoding {
    /// Picks the encoding a store supports
    pub fn for_store(store: &dyn DocumentStore) -> Self {
        if store.supports_native_datetime() {
            TemporalEncoding::Native
        } else {
            TemporalEncoding::Iso8601
        }
    }
}

/// Serializes a validated record into document form.
pub fn to_document<T: Stored>(record: &T, encoding: TemporalEncoding) -> MappingResult<Document> {
    let encode_error = |reason: String| MappingError::Encode {
        collection: T::COLLECTION,
        reason,
    };

    let mut fields = match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => return Err(encode_error("record is not an object".to_string())),
        Err(e) => return Err(encode_error(e.to_string())),
    };

    let mut document = Document::new();
    for field in T::schema().fields {
        let value = fields.remove(field.name).unwrap_or(Value::Null);
        document.insert(field.name, encode_field(field, value, encoding));
    }
    Ok(document)
}

fn encode_field(field: &FieldDef, value: Value, encoding: TemporalEncoding) -> DocValue {
    if field.field_type == FieldType::Timestamp {
        if let Some(dt) = value.as_str().and_then(|s| s.parse::<DateTime<Utc>>().ok()) {
            return match encoding {
                TemporalEncoding::Native => DocValue::DateTime(dt),
                TemporalEncoding::Iso8601 => DocValue::String(iso8601(&dt)),
            };
        }
    }
    DocValue::from(value)
}

/// Strips the store identifier and renders temporal values as strings.
pub fn normalize(mut document: Document) -> Map<String, Value> {
    document.remove(ID_FIELD);
    document.into_json()
}

/// Rebuilds a typed record from a stored document.
///
/// # Errors
///
/// Returns `MappingError::InvalidDocument` when a required field is absent
/// or a present field violates its constraint.
pub fn from_document<T: Stored>(document: Document) -> MappingResult<T> {
    let id = describe_id(&document);
    let schema = T::schema();

    let mut fields = normalize(document);
    fields.retain(|key, _| schema.contains(key));

    T::from_json(&Value::Object(fields)).map_err(|source| MappingError::InvalidDocument {
        collection: T::COLLECTION,
        id,
        source,
    })
}

fn describe_id(document: &Document) -> String {
    match document.get(ID_FIELD) {
        Some(DocValue::Id(id)) => id.to_string(),
        Some(DocValue::String(s)) => s.clone(),
        _ => "<no id>".to_string(),
    }
}

/// Outcome of mapping a batch of documents
#[derive(Debug)]
pub struct MappedBatch<T> {
    /// Records that mapped cleanly, in input order
    pub records: Vec<T>,
    /// Documents that were skipped
    pub rejected: Vec<MappingError>,
}

/// Maps every document, keeping failures aside instead of aborting.
pub fn from_documents<T: Stored>(documents: Vec<Document>) -> MappedBatch<T> {
    let mut records = Vec::with_capacity(documents.len());
    let mut rejected = Vec::new();
    for document in documents {
        match from_document(document) {
            Ok(record) => records.push(record),
            Err(e) => rejected.push(e),
        }
    }
    MappedBatch { records, rejected }
}
