//! Keyset cursors
//!
//! A cursor is the list of sort key values of one row, one value per
//! ordering criterion. Callers treat it as opaque and usually carry it
//! around as a token produced by [`Cursor::encode`].

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Upper bound on accepted token length, in characters
pub const MAX_CURSOR_TOKEN_LEN: usize = 8 * 1024;

// ============================================================================
// Key Values
// ============================================================================

/// One element of a cursor key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl KeyValue {
    /// Convert a scalar JSON value. Arrays and objects have no key form.
    ///
    /// Integers beyond the `i64` range become `Float`, losing precision;
    /// rows and cursors convert the same way, so their keys stay comparable.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Convert to a JSON value. Non-finite floats become null; cursors never
    /// hold them.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Text(s) => Value::String(s.clone()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total ascending order over key values.
    ///
    /// Null sorts first, then booleans, numbers and text. Integers and
    /// floats compare numerically with each other.
    pub fn compare(&self, other: &Self, ignore_case: bool) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) if ignore_case => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for KeyValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for KeyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// Position of a row within a keyset ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeyValue>", into = "Vec<KeyValue>")]
pub struct Cursor {
    key: Vec<KeyValue>,
}

impl Cursor {
    /// Create a cursor from the key values of a row.
    ///
    /// The key must be non-empty, and floats must be finite so the cursor
    /// survives a round trip through its token.
    pub fn for_key<V: Into<KeyValue>>(key: impl IntoIterator<Item = V>) -> Result<Self> {
        let key: Vec<KeyValue> = key.into_iter().map(Into::into).collect();
        if key.is_empty() {
            return Err(Error::invalid_request(
                "cursor",
                "cursor key must have at least one value",
            ));
        }
        if key
            .iter()
            .any(|value| matches!(value, KeyValue::Float(f) if !f.is_finite()))
        {
            return Err(Error::invalid_request(
                "cursor",
                "cursor key values must be finite numbers",
            ));
        }
        Ok(Self { key })
    }

    /// Number of key values
    pub fn size(&self) -> usize {
        self.key.len()
    }

    /// Key value at `index`, if present
    pub fn element_at(&self, index: usize) -> Option<&KeyValue> {
        self.key.get(index)
    }

    /// All key values, most significant first
    pub fn elements(&self) -> &[KeyValue] {
        &self.key
    }

    /// Encode as an opaque URL-safe token
    pub fn encode(&self) -> String {
        let json = Value::Array(self.key.iter().map(KeyValue::to_json).collect());
        URL_SAFE_NO_PAD.encode(json.to_string())
    }

    /// Decode a token produced by [`Cursor::encode`].
    ///
    /// Surrounding whitespace is trimmed.
    pub fn decode(token: &str) -> Result<Self> {
        let token = token.trim();

        if token.is_empty() {
            return Err(Error::cursor_decode("token is empty"));
        }

        if token.len() > MAX_CURSOR_TOKEN_LEN {
            return Err(Error::cursor_decode(format!(
                "token exceeds max length: {} chars (max {MAX_CURSOR_TOKEN_LEN})",
                token.len()
            )));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| Error::cursor_decode(format!("not valid base64: {e}")))?;

        let key: Vec<KeyValue> = serde_json::from_slice(&bytes)
            .map_err(|e| Error::cursor_decode(format!("not a key list: {e}")))?;

        Self::for_key(key).map_err(|_| Error::cursor_decode("token holds an empty key"))
    }
}

impl TryFrom<Vec<KeyValue>> for Cursor {
    type Error = Error;

    fn try_from(key: Vec<KeyValue>) -> Result<Self> {
        Self::for_key(key)
    }
}

impl From<Cursor> for Vec<KeyValue> {
    fn from(cursor: Cursor) -> Self {
        cursor.key
    }
}
