//! # Temporal Types
//!
//! ISO-8601 text on the cstruct side, `chrono` values on the appstruct side.
//!
//! [`DateTime`] accepts RFC 3339 timestamps, naive timestamps (the type's
//! default offset is applied) and bare dates (midnight). [`Date`] and
//! [`Time`] also accept full timestamps and keep the relevant part.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset};
use strata_core::Value;

use super::SchemaType;
use crate::invalid::Invalid;
use crate::node::SchemaNode;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

fn utc() -> FixedOffset {
    chrono::Utc.fix()
}

fn parse_datetime(text: &str, offset: FixedOffset) -> Option<chrono::DateTime<FixedOffset>> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    naive.and_local_timezone(offset).single()
}

fn is_empty_text(cstruct: &Value) -> bool {
    matches!(cstruct, Value::Str(s) if s.is_empty())
}

fn invalid_date(node: &SchemaNode, value: &Value) -> Invalid {
    Invalid::new(node, "Invalid date").with_value(value.clone())
}

/// Timestamp type.
#[derive(Debug, Clone)]
pub struct DateTime {
    default_offset: FixedOffset,
}

impl Default for DateTime {
    fn default() -> Self {
        Self {
            default_offset: utc(),
        }
    }
}

impl DateTime {
    /// A timestamp type that reads naive input as UTC.
    pub fn new() -> Self {
        Self::default()
    }

    /// A timestamp type that reads naive input in `offset`.
    pub fn with_default_offset(offset: FixedOffset) -> Self {
        Self {
            default_offset: offset,
        }
    }
}

impl SchemaType for DateTime {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        match appstruct {
            Value::Null => Ok(Value::Null),
            Value::DateTime(dt) => Ok(Value::Str(dt.to_rfc3339())),
            Value::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .and_then(|naive| naive.and_local_timezone(self.default_offset).single())
                .map(|dt| Value::Str(dt.to_rfc3339()))
                .ok_or_else(|| invalid_date(node, appstruct)),
            other => Err(Invalid::new(node, format!("\"{other}\" is not a datetime object"))
                .with_value(other.clone())),
        }
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        match cstruct {
            Value::Null => Ok(Value::Null),
            _ if is_empty_text(cstruct) => Ok(Value::Null),
            Value::DateTime(dt) => Ok(Value::DateTime(*dt)),
            Value::Str(s) => parse_datetime(s.trim(), self.default_offset)
                .map(Value::DateTime)
                .ok_or_else(|| invalid_date(node, cstruct)),
            other => Err(invalid_date(node, other)),
        }
    }
}

/// Calendar date type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Date;

impl Date {
    /// A date type.
    pub fn new() -> Self {
        Self
    }
}

impl SchemaType for Date {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        match appstruct {
            Value::Null => Ok(Value::Null),
            Value::Date(d) => Ok(Value::Str(d.format(DATE_FORMAT).to_string())),
            Value::DateTime(dt) => Ok(Value::Str(dt.date_naive().format(DATE_FORMAT).to_string())),
            other => Err(Invalid::new(node, format!("\"{other}\" is not a date object"))
                .with_value(other.clone())),
        }
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        match cstruct {
            Value::Null => Ok(Value::Null),
            _ if is_empty_text(cstruct) => Ok(Value::Null),
            Value::Date(d) => Ok(Value::Date(*d)),
            Value::Str(s) => {
                let text = s.trim();
                NaiveDate::parse_from_str(text, DATE_FORMAT)
                    .ok()
                    .or_else(|| parse_datetime(text, utc()).map(|dt| dt.date_naive()))
                    .map(Value::Date)
                    .ok_or_else(|| invalid_date(node, cstruct))
            }
            other => Err(invalid_date(node, other)),
        }
    }
}

/// Wall-clock time type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time;

impl Time {
    /// A time type.
    pub fn new() -> Self {
        Self
    }
}

impl SchemaType for Time {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        match appstruct {
            Value::Null => Ok(Value::Null),
            Value::Time(t) => Ok(Value::Str(t.format("%H:%M:%S%.f").to_string())),
            Value::DateTime(dt) => Ok(Value::Str(dt.time().format("%H:%M:%S%.f").to_string())),
            other => Err(Invalid::new(node, format!("\"{other}\" is not a time object"))
                .with_value(other.clone())),
        }
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        match cstruct {
            Value::Null => Ok(Value::Null),
            _ if is_empty_text(cstruct) => Ok(Value::Null),
            Value::Time(t) => Ok(Value::Time(*t)),
            Value::Str(s) => {
                let text = s.trim();
                TIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
                    .or_else(|| parse_datetime(text, utc()).map(|dt| dt.time()))
                    .map(Value::Time)
                    .ok_or_else(|| Invalid::new(node, "Invalid time").with_value(cstruct.clone()))
            }
            other => Err(Invalid::new(node, "Invalid time").with_value(other.clone())),
        }
    }
}
