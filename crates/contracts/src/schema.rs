//! Declarative schema descriptors.
//!
//! Schemas form a closed set of shapes interpreted by one generic routine in
//! [`crate::validator`]. They are built once (typically when a module's API
//! is constructed) and reused for every call.

/// Shape a JSON value is expected to have.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String,
    /// Any JSON number (integer or floating point).
    Number,
    /// A JSON number without a fractional part.
    Integer,
    Boolean,
    /// A string holding an RFC 3339 timestamp.
    Timestamp,
    /// A string restricted to a closed set of literals.
    Enum(Vec<&'static str>),
    Object(Vec<Field>),
    /// Homogeneous sequence; every element must satisfy the item schema.
    Array(Box<Schema>),
}

/// A named member of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

impl Schema {
    /// Start an empty object schema; add members with [`Schema::required`]
    /// and [`Schema::optional`].
    pub fn object() -> Self {
        Schema::Object(Vec::new())
    }

    pub fn enumeration(literals: impl IntoIterator<Item = &'static str>) -> Self {
        Schema::Enum(literals.into_iter().collect())
    }

    pub fn array_of(item: Schema) -> Self {
        Schema::Array(Box::new(item))
    }

    /// Add a required member. No-op on non-object schemas.
    pub fn required(self, name: &'static str, schema: Schema) -> Self {
        self.with_field(Field {
            name,
            schema,
            required: true,
        })
    }

    /// Add an optional member (may be absent or `null`). No-op on non-object schemas.
    pub fn optional(self, name: &'static str, schema: Schema) -> Self {
        self.with_field(Field {
            name,
            schema,
            required: false,
        })
    }

    fn with_field(self, field: Field) -> Self {
        match self {
            Schema::Object(mut fields) => {
                fields.retain(|f| f.name != field.name);
                fields.push(field);
                Schema::Object(fields)
            }
            other => other,
        }
    }

    /// Short description of the expected shape, used in violation messages.
    pub fn describe(&self) -> String {
        match self {
            Schema::String => "string".to_string(),
            Schema::Number => "number".to_string(),
            Schema::Integer => "integer".to_string(),
            Schema::Boolean => "boolean".to_string(),
            Schema::Timestamp => "RFC 3339 timestamp".to_string(),
            Schema::Enum(literals) => {
                let quoted: Vec<String> = literals.iter().map(|l| format!("\"{l}\"")).collect();
                format!("one of {}", quoted.join(" | "))
            }
            Schema::Object(_) => "object".to_string(),
            Schema::Array(item) => format!("array of {}", item.describe()),
        }
    }
}
