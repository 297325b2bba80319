//! Request values handed to compiled serializers.
//!
//! A [`Value`] mirrors the typed request object of a generated SDK: structures
//! hold their present fields in declaration order, an absent optional field is
//! simply missing from the map.

use bytes::Bytes;
use indexmap::IndexMap;

/// A request value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Structure with its present fields.
    Structure(IndexMap<String, Value>),
    /// Ordered list of items.
    List(Vec<Value>),
    /// Text value.
    String(String),
    /// Binary value; already transport-encoded when written as XML text.
    Blob(Bytes),
    /// Boolean value.
    Boolean(bool),
}

impl Value {
    /// Build a structure value from `(field, value)` pairs.
    pub fn structure<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Structure(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a list of string values.
    pub fn strings<S, I>(items: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self::List(items.into_iter().map(|s| Self::String(s.into())).collect())
    }

    /// Short name of the value kind, for error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Structure(_) => "structure",
            Self::List(_) => "list",
            Self::String(_) => "string",
            Self::Blob(_) => "blob",
            Self::Boolean(_) => "boolean",
        }
    }

    /// Fields of a structure value.
    #[must_use]
    pub fn as_structure(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Structure(fields) => Some(fields),
            _ => None,
        }
    }

    /// A field of a structure value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_structure().and_then(|fields| fields.get(name))
    }

    /// Convert a JSON document into a value.
    ///
    /// `null` means "absent": it yields `None` at the top level and drops the
    /// field or list item it appears in. Numbers become their decimal text.
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(Self::Boolean(b)),
            serde_json::Value::Number(n) => Some(Self::String(n.to_string())),
            serde_json::Value::String(s) => Some(Self::String(s)),
            serde_json::Value::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            serde_json::Value::Object(fields) => Some(Self::Structure(
                fields
                    .into_iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Self::Blob(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}
