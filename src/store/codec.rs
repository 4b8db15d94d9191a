//! Line codec for on-disk documents
//!
//! Each document is one JSON object per line. Values JSON cannot express
//! are wrapped in single-key objects:
//!
//! - timestamp: `{"$date": "<rfc3339>"}`
//! - identifier: `{"$oid": "<hex>"}`

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

use super::document::{iso8601, DocValue, Document, DocumentId};

const DATE_KEY: &str = "$date";
const OID_KEY: &str = "$oid";

/// Encodes a document as one line of JSON (no trailing newline).
pub fn encode_line(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Value::Object(encode_document(document)))
}

/// Decodes one line written by [`encode_line`].
pub fn decode_line(line: &str) -> Result<Document, String> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(map)) => Ok(decode_document(map)),
        Ok(other) => Err(format!("expected object, found {}", kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn encode_document(document: &Document) -> Map<String, Value> {
    document
        .iter()
        .map(|(k, v)| (k.to_string(), encode_value(v)))
        .collect()
}

fn encode_value(value: &DocValue) -> Value {
    match value {
        DocValue::Null => Value::Null,
        DocValue::Bool(b) => Value::Bool(*b),
        DocValue::Int(i) => Value::from(*i),
        DocValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        DocValue::String(s) => Value::String(s.clone()),
        DocValue::DateTime(dt) => wrap(DATE_KEY, iso8601(dt)),
        DocValue::Id(id) => wrap(OID_KEY, id.to_string()),
        DocValue::Array(items) => Value::Array(items.iter().map(encode_value).collect()),
        DocValue::Document(doc) => Value::Object(encode_document(doc)),
    }
}

fn wrap(key: &str, s: String) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), Value::String(s));
    Value::Object(map)
}

fn decode_document(map: Map<String, Value>) -> Document {
    map.into_iter().map(|(k, v)| (k, decode_value(v))).collect()
}

fn decode_value(value: Value) -> DocValue {
    match value {
        Value::Object(map) => match unwrap_special(&map) {
            Some(special) => special,
            None => DocValue::Document(decode_document(map)),
        },
        Value::Array(items) => DocValue::Array(items.into_iter().map(decode_value).collect()),
        other => DocValue::from(other),
    }
}

fn unwrap_special(map: &Map<String, Value>) -> Option<DocValue> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    let s = value.as_str()?;
    match key.as_str() {
        DATE_KEY => s.parse::<DateTime<Utc>>().ok().map(DocValue::DateTime),
        OID_KEY => DocumentId::parse(s).map(DocValue::Id),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
