//! Untyped documents as held by a store
//!
//! Unlike JSON, a document value can carry a native timestamp and a store
//! identifier. Conversion back to JSON renders both as strings.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// Key under which a store keeps a document's identifier
pub const ID_FIELD: &str = "_id";
/// Insert time, set by the store
pub const CREATED_AT_FIELD: &str = "created_at";
/// Last write time, set by the store
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Opaque, store-assigned document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A single document value
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Id(DocumentId),
    Array(Vec<DocValue>),
    Document(Document),
}

impl DocValue {
    /// Converts to JSON. Timestamps become ISO-8601 strings and
    /// identifiers become their string form.
    pub fn into_json(self) -> Value {
        match self {
            DocValue::Null => Value::Null,
            DocValue::Bool(b) => Value::Bool(b),
            DocValue::Int(i) => Value::from(i),
            DocValue::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            DocValue::String(s) => Value::String(s),
            DocValue::DateTime(dt) => Value::String(iso8601(&dt)),
            DocValue::Id(id) => Value::String(id.to_string()),
            DocValue::Array(items) => {
                Value::Array(items.into_iter().map(DocValue::into_json).collect())
            }
            DocValue::Document(doc) => Value::Object(doc.into_json()),
        }
    }
}

impl From<Value> for DocValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DocValue::Null,
            Value::Bool(b) => DocValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DocValue::Int(i),
                // u64 beyond i64::MAX and all non-integers
                None => DocValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => DocValue::String(s),
            Value::Array(items) => DocValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => DocValue::Document(Document::from(map)),
        }
    }
}

impl From<DateTime<Utc>> for DocValue {
    fn from(dt: DateTime<Utc>) -> Self {
        DocValue::DateTime(dt)
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::String(s.to_string())
    }
}

/// Renders a timestamp as RFC 3339 in UTC, keeping sub-second precision
/// only when present.
pub fn iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Mapping of field name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: BTreeMap<String, DocValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DocValue>) -> Option<DocValue> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<DocValue> {
        self.fields.remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The store identifier, when the document has been persisted
    pub fn id(&self) -> Option<DocumentId> {
        match self.fields.get(ID_FIELD) {
            Some(DocValue::Id(id)) => Some(*id),
            _ => None,
        }
    }

    /// Whether every key of `filter` is present here with an equal value.
    /// An empty filter matches everything.
    pub fn matches(&self, filter: &Document) -> bool {
        filter
            .iter()
            .all(|(key, expected)| self.get(key) == Some(expected))
    }

    /// Converts to a JSON object; see [`DocValue::into_json`].
    pub fn into_json(self) -> Map<String, Value> {
        self.fields
            .into_iter()
            .map(|(k, v)| (k, v.into_json()))
            .collect()
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, DocValue::from(v))).collect(),
        }
    }
}

impl FromIterator<(String, DocValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, DocValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, DocValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, DocValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
