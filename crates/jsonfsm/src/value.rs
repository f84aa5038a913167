use std::collections::BTreeMap;

use crate::error::TypeMismatch;

pub type Map = BTreeMap<String, Value>;
pub type Array = Vec<Value>;

/// A decoded JSON value.
///
/// Object keys are unique; iteration order is the map's ordering, not the
/// order keys appeared in the source. Array order is the source order.
/// Numbers are integers only; fractional and exponent forms are not part of
/// the accepted grammar.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(i64),
    String(String),
    Array(Array),
    Object(Map),
}

/// Payload-free tag of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(s)
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// The boolean payload, or [`TypeMismatch`] for any other kind.
    pub fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch(ValueKind::Bool, other)),
        }
    }

    /// The integer payload, or [`TypeMismatch`] for any other kind.
    pub fn as_i64(&self) -> Result<i64, TypeMismatch> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(mismatch(ValueKind::Number, other)),
        }
    }

    /// The string payload, or [`TypeMismatch`] for any other kind.
    pub fn as_str(&self) -> Result<&str, TypeMismatch> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(mismatch(ValueKind::String, other)),
        }
    }

    /// The array payload, or [`TypeMismatch`] for any other kind.
    pub fn as_array(&self) -> Result<&Array, TypeMismatch> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(mismatch(ValueKind::Array, other)),
        }
    }

    /// The object payload, or [`TypeMismatch`] for any other kind.
    pub fn as_object(&self) -> Result<&Map, TypeMismatch> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(mismatch(ValueKind::Object, other)),
        }
    }
}

fn mismatch(expected: ValueKind, found: &Value) -> TypeMismatch {
    TypeMismatch {
        expected,
        found: found.kind(),
    }
}

#[cfg(feature = "json")]
impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(n.into()),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => {
                let mut m = serde_json::Map::new();
                for (k, vv) in map {
                    m.insert(k, vv.into());
                }
                serde_json::Value::Object(m)
            }
        }
    }
}
