//! Literal values in Cypher expressions

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Literal value. Floats compare and hash by bit pattern so the type can
/// key hash maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<CypherValue>),
}

impl CypherValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CypherValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CypherValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CypherValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for CypherValue {
    fn eq(&self, other: &Self) -> bool {
        use CypherValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (List(a), List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CypherValue {}

impl Hash for CypherValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CypherValue::Null => {}
            CypherValue::Boolean(v) => v.hash(state),
            CypherValue::Integer(v) => v.hash(state),
            CypherValue::Float(v) => v.to_bits().hash(state),
            CypherValue::String(v) => v.hash(state),
            CypherValue::List(v) => v.hash(state),
        }
    }
}

/// Cypher literal syntax
impl fmt::Display for CypherValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CypherValue::Null => f.write_str("null"),
            CypherValue::Boolean(v) => write!(f, "{}", v),
            CypherValue::Integer(v) => write!(f, "{}", v),
            CypherValue::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{:.1}", v),
            CypherValue::Float(v) => write!(f, "{}", v),
            CypherValue::String(v) => {
                write!(f, "'{}'", v.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            CypherValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Boolean(v)
    }
}

impl From<i32> for CypherValue {
    fn from(v: i32) -> Self {
        CypherValue::Integer(v.into())
    }
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Integer(v)
    }
}

impl From<f64> for CypherValue {
    fn from(v: f64) -> Self {
        CypherValue::Float(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl From<String> for CypherValue {
    fn from(v: String) -> Self {
        CypherValue::String(v)
    }
}

impl<T: Into<CypherValue>> From<Option<T>> for CypherValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CypherValue::Null, Into::into)
    }
}

impl<T: Into<CypherValue>> From<Vec<T>> for CypherValue {
    fn from(v: Vec<T>) -> Self {
        CypherValue::List(v.into_iter().map(Into::into).collect())
    }
}
