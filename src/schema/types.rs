//! Declarative field tables
//!
//! Supported semantic types:
//! - string: UTF-8 string
//! - email: string that parses as an email address
//! - float: 64-bit floating point (integers accepted)
//! - int: 64-bit signed integer with optional inclusive bounds
//! - enum: one of a fixed set of string literals
//! - timestamp: RFC 3339 / ISO-8601 date-time

/// Semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Email address string
    Email,
    /// 64-bit floating point
    Float,
    /// 64-bit signed integer, bounds are inclusive
    Int { min: Option<i64>, max: Option<i64> },
    /// One of the listed literals
    Enum(&'static [&'static str]),
    /// UTC date-time carried as an ISO-8601 string
    Timestamp,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Email => "email",
            FieldType::Float => "float",
            FieldType::Int { .. } => "int",
            FieldType::Enum(_) => "enum",
            FieldType::Timestamp => "timestamp",
        }
    }

    /// Integer type bounded to `[min, max]`.
    pub const fn int_range(min: i64, max: i64) -> Self {
        FieldType::Int {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Unbounded integer type.
    pub const fn int() -> Self {
        FieldType::Int {
            min: None,
            max: None,
        }
    }
}

/// A single field of a record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as it appears in JSON and in stored documents
    pub name: &'static str,
    /// Semantic type
    pub field_type: FieldType,
    /// Whether the key must be present (when no default is set)
    pub required: bool,
    /// Whether an explicit `null` is accepted
    pub nullable: bool,
    /// Literal applied when the key is absent
    pub default: Option<&'static str>,
}

impl FieldDef {
    /// A field that must be present and non-null.
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
            nullable: false,
            default: None,
        }
    }

    /// A field that may be absent or `null`.
    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            nullable: true,
            default: None,
        }
    }

    /// Sets the literal used when the key is absent. A defaulted field is
    /// never reported as missing.
    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            required: false,
            default: Some(default),
            ..self
        }
    }

    /// Disallows explicit `null` for an otherwise optional field.
    pub const fn non_null(self) -> Self {
        Self {
            nullable: false,
            ..self
        }
    }
}

/// Named, ordered list of field definitions.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    /// Shape name, used in error messages
    pub name: &'static str,
    /// Field definitions in declaration order
    pub fields: &'static [FieldDef],
}

impl Schema {
    /// Looks up a field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `name` is a declared field
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Declared field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}
