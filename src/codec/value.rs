//! The callable value model and its JSON mapping.
//!
//! Values cross the wire as plain JSON, except 64-bit integers which travel as
//! an `Int64Value` wrapper object so that no precision is lost in clients whose
//! native number type is a double.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Number;
use thiserror::Error;

pub const INT64_TYPE_URL: &str = "type.googleapis.com/google.protobuf.Int64Value";

const INT64_VALUE_KEY: &str = "value";
const INT64_TYPE_KEY: &str = "@type";

#[derive(Debug, Error)]
#[error("malformed json: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("int64 value must be a base-10 integer, got {0:?}")]
pub struct InvalidInt64(pub String);

/// A 64-bit integer carried as decimal text.
///
/// The text is kept exactly as received, so `"3"` and `"03"` are different
/// wrappers even though they denote the same number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Int64Wrapper {
    value: String,
}

impl Int64Wrapper {
    pub fn new(value: i64) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    pub fn parse(value: impl Into<String>) -> Result<Self, InvalidInt64> {
        let value = value.into();
        if !is_decimal_integer(&value) || value.parse::<i64>().is_err() {
            return Err(InvalidInt64(value));
        }

        Ok(Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn as_i64(&self) -> i64 {
        // Construction guarantees the text fits.
        self.value.parse().unwrap_or_default()
    }
}

fn is_decimal_integer(text: &str) -> bool {
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

/// String-keyed mapping that remembers insertion order.
///
/// Order only matters for rendering; equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Mapping),
    Int64(Int64Wrapper),
}

impl Value {
    /// Builds a mapping value from `(key, value)` pairs, keeping their order.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(entries.into_iter().collect())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Int64Wrapper> for Value {
    fn from(value: Int64Wrapper) -> Self {
        Self::Int64(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_value(self).serialize(serializer)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", encode_value(self))
    }
}

pub fn encode_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(flag) => serde_json::Value::Bool(*flag),
        Value::Number(number) => serde_json::Value::Number(number.clone()),
        Value::String(text) => serde_json::Value::String(text.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(encode_value).collect()),
        Value::Object(mapping) => serde_json::Value::Object(
            mapping
                .iter()
                .map(|(key, value)| (key.to_string(), encode_value(value)))
                .collect(),
        ),
        Value::Int64(wrapper) => {
            let mut object = serde_json::Map::new();
            object.insert(
                INT64_VALUE_KEY.to_string(),
                serde_json::Value::String(wrapper.as_str().to_string()),
            );
            object.insert(
                INT64_TYPE_KEY.to_string(),
                serde_json::Value::String(INT64_TYPE_URL.to_string()),
            );
            serde_json::Value::Object(object)
        }
    }
}

pub fn decode_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(flag) => Value::Bool(*flag),
        serde_json::Value::Number(number) => Value::Number(number.clone()),
        serde_json::Value::String(text) => Value::String(text.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(decode_value).collect()),
        serde_json::Value::Object(object) => match as_int64_wrapper(object) {
            Some(wrapper) => Value::Int64(wrapper),
            None => Value::Object(
                object
                    .iter()
                    .map(|(key, value)| (key.as_str(), decode_value(value)))
                    .collect(),
            ),
        },
    }
}

fn as_int64_wrapper(object: &serde_json::Map<String, serde_json::Value>) -> Option<Int64Wrapper> {
    if object.len() != 2 {
        return None;
    }

    let type_url = object.get(INT64_TYPE_KEY)?.as_str()?;
    if type_url != INT64_TYPE_URL {
        return None;
    }

    let text = object.get(INT64_VALUE_KEY)?.as_str()?;
    Int64Wrapper::parse(text).ok()
}

/// Parses raw bytes as JSON and decodes them into a [`Value`].
pub fn decode_slice(bytes: &[u8]) -> Result<Value, DecodeError> {
    let json: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(decode_value(&json))
}

pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Int64(a), Value::Int64(b)) => a.as_str() == b.as_str(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, value)| {
                    b.get(key)
                        .is_some_and(|other| values_equal(value, other))
                })
        }
        _ => false,
    }
}
