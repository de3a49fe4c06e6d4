//! # Numeric Types
//!
//! Numbers travel as decimal text on the cstruct side. Deserialization
//! accepts text, integers, floats and booleans; empty text and `None` are
//! logically null.

use serde::{Deserialize, Serialize};
use strata_core::Value;

use super::SchemaType;
use crate::invalid::Invalid;
use crate::node::SchemaNode;

fn not_a_number(node: &SchemaNode, value: &Value) -> Invalid {
    Invalid::new(node, format!("\"{value}\" is not a number")).with_value(value.clone())
}

/// Whether a cstruct should be read as "no value supplied".
fn is_logically_null(cstruct: &Value) -> bool {
    match cstruct {
        Value::Null | Value::None => true,
        Value::Str(s) => s.is_empty(),
        _ => false,
    }
}

/// Configuration for [`Int`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntOptions {
    /// Reject floats with a fractional part instead of truncating them.
    pub strict: bool,
}

/// 64-bit integer type.
#[derive(Debug, Clone, Default)]
pub struct Int {
    strict: bool,
}

impl Int {
    /// A lenient integer type that truncates floats.
    pub fn new() -> Self {
        Self::default()
    }

    /// An integer type that rejects fractional floats.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Build from deserialized options.
    pub fn from_options(options: IntOptions) -> Self {
        Self {
            strict: options.strict,
        }
    }

    fn coerce(&self, node: &SchemaNode, value: &Value) -> Result<i64, Invalid> {
        match value {
            Value::Int(i) => Ok(*i),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(x) => {
                if !x.is_finite() || *x < i64::MIN as f64 || *x >= i64::MAX as f64 {
                    return Err(not_a_number(node, value));
                }
                if self.strict && x.fract() != 0.0 {
                    return Err(Invalid::new(node, format!("\"{value}\" is not an integer"))
                        .with_value(value.clone()));
                }
                Ok(x.trunc() as i64)
            }
            Value::Str(s) => s.trim().parse::<i64>().map_err(|_| not_a_number(node, value)),
            _ => Err(not_a_number(node, value)),
        }
    }
}

impl SchemaType for Int {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        if matches!(appstruct, Value::Null | Value::None) {
            return Ok(Value::Null);
        }
        let i = self.coerce(node, appstruct)?;
        Ok(Value::Str(i.to_string()))
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        if is_logically_null(cstruct) {
            return Ok(Value::Null);
        }
        Ok(Value::Int(self.coerce(node, cstruct)?))
    }
}

/// 64-bit float type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl Float {
    /// A float type.
    pub fn new() -> Self {
        Self
    }

    /// NaN and the infinities are rejected whatever their spelling.
    fn coerce(node: &SchemaNode, value: &Value) -> Result<f64, Invalid> {
        let x = match value {
            Value::Float(x) => *x,
            Value::Int(i) => *i as f64,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Str(s) => s.trim().parse::<f64>().map_err(|_| not_a_number(node, value))?,
            _ => return Err(not_a_number(node, value)),
        };
        if x.is_finite() {
            Ok(x)
        } else {
            Err(not_a_number(node, value))
        }
    }
}

impl SchemaType for Float {
    /// Uses Rust's shortest round-trip float formatting, e.g. `"1.0"`.
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        if matches!(appstruct, Value::Null | Value::None) {
            return Ok(Value::Null);
        }
        let x = Self::coerce(node, appstruct)?;
        Ok(Value::Str(format!("{x:?}")))
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        if is_logically_null(cstruct) {
            return Ok(Value::Null);
        }
        Ok(Value::Float(Self::coerce(node, cstruct)?))
    }
}
