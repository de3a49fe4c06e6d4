//! # Value Model: cstructs, appstructs and the Null Sentinel
//!
//! A single dynamic [`Value`] enum carries both sides of a schema
//! conversion. Types decide which variants they accept on each side: a
//! boolean type accepts `Str("yes")` as a cstruct and produces `Bool(true)`
//! as an appstruct.
//!
//! ## Null Sentinel
//!
//! [`Value::Null`] (exported as [`NULL`]) means "no value supplied". It is a
//! unit variant, so there is exactly one such value and equality against it
//! is identity. It is distinct from [`Value::None`], which is a *supplied*
//! null (for example a JSON `null`).
//!
//! ## JSON Bridging
//!
//! [`Value::from_json`] never produces the sentinel: JSON `null` becomes
//! `None`. The sentinel only appears when a composite type extracts a child
//! that is absent. [`Value::to_json`] drops map entries that hold the
//! sentinel, which makes absence survive a JSON round trip.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde_json::Value as Json;

/// The "no value supplied" sentinel.
pub const NULL: Value = Value::Null;

/// Flat, dotted-path keyed view of a nested appstruct.
pub type Flattened = BTreeMap<String, Value>;

/// A cstruct or appstruct.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The null sentinel. See [`NULL`].
    #[default]
    Null,
    /// An explicitly supplied null.
    None,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 text.
    Str(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Timestamp with a fixed UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Wall-clock time.
    Time(NaiveTime),
    /// Variable-length sequence.
    List(Vec<Value>),
    /// Fixed-arity sequence.
    Tuple(Vec<Value>),
    /// Order-preserving collection without duplicates. Build through
    /// [`Value::set`].
    Set(Vec<Value>),
    /// String-keyed mapping.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true if this is the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Build a [`Value::Set`], dropping repeated items while keeping the
    /// first occurrence of each.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    /// Build a [`Value::Map`] from key/value pairs.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Short label for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Time(_) => "time",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// Borrow the text of a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the items of a `List`, `Tuple` or `Set`.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the entries of a `Map`.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Number of items for strings (in chars) and containers.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items.len()),
            Value::Map(m) => Some(m.len()),
            _ => None,
        }
    }

    /// Returns true for empty strings and empty containers.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Partial ordering across values of comparable kinds.
    ///
    /// Integers and floats compare numerically with each other. Strings,
    /// booleans and temporals compare only within their own kind. Everything
    /// else is unordered.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Convert a parsed JSON document into a cstruct.
    ///
    /// JSON `null` becomes [`Value::None`], never the sentinel.
    pub fn from_json(json: Json) -> Self {
        match json {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from_json).collect()),
            Json::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render as JSON.
    ///
    /// Map entries holding the sentinel are omitted. Elsewhere the sentinel
    /// and `None` both render as JSON `null`. Temporals render as ISO-8601
    /// text; tuples and sets render as arrays. Non-finite floats render as
    /// `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null | Value::None => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Str(s) => Json::String(s.clone()),
            Value::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
            Value::DateTime(dt) => Json::String(dt.to_rfc3339()),
            Value::Time(t) => Json::String(t.format("%H:%M:%S%.f").to_string()),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "<null>"),
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from_json(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_distinct_from_falsy_values() {
        for falsy in [
            Value::None,
            Value::Bool(false),
            Value::Int(0),
            Value::Float(0.0),
            Value::Str(String::new()),
            Value::List(vec![]),
            Value::Map(BTreeMap::new()),
        ] {
            assert_ne!(NULL, falsy, "sentinel compared equal to {falsy:?}");
            assert!(!falsy.is_null());
        }
        assert!(NULL.is_null());
        assert_eq!(Value::default(), NULL);
    }

    #[test]
    fn test_from_json_maps_null_to_none() {
        assert_eq!(Value::from_json(Json::Null), Value::None);
        let v = Value::from_json(json!({"a": null, "b": [1, 2.5, "x"]}));
        let m = v.as_map().unwrap();
        assert_eq!(m["a"], Value::None);
        assert_eq!(
            m["b"],
            Value::List(vec![Value::Int(1), Value::Float(2.5), Value::from("x")])
        );
    }

    #[test]
    fn test_to_json_omits_sentinel_entries() {
        let v = Value::map([("present", Value::Int(1)), ("absent", NULL), ("none", Value::None)]);
        assert_eq!(v.to_json(), json!({"present": 1, "none": null}));
    }

    #[test]
    fn test_set_deduplicates_preserving_order() {
        let s = Value::set(vec![Value::from("b"), Value::from("a"), Value::from("b")]);
        assert_eq!(s, Value::Set(vec![Value::from("b"), Value::from("a")]));
    }

    #[test]
    fn test_compare_mixed_numerics() {
        assert_eq!(Value::Int(2).compare(&Value::Float(2.5)), Some(Ordering::Less));
        assert_eq!(Value::Float(3.0).compare(&Value::Int(3)), Some(Ordering::Equal));
        assert_eq!(Value::from("a").compare(&Value::Int(1)), None);
    }

    #[test]
    fn test_len_counts_chars() {
        assert_eq!(Value::from("h\u{00e9}llo").len(), Some(5));
        assert_eq!(Value::Int(5).len(), None);
        assert!(Value::List(vec![]).is_empty());
    }

    #[test]
    fn test_display_float_keeps_decimal_point() {
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::from("text").to_string(), "text");
        assert_eq!(Value::List(vec![Value::Int(1)]).to_string(), "[1]");
    }
}
