//! # Set Type
//!
//! An unordered leaf collection. Items are not converted individually; the
//! input is only de-duplicated, keeping the first occurrence of each item.

use strata_core::Value;

use super::SchemaType;
use crate::invalid::Invalid;
use crate::node::SchemaNode;

/// De-duplicating collection type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Set;

impl Set {
    /// A set type.
    pub fn new() -> Self {
        Self
    }

    fn coerce(node: &SchemaNode, value: &Value) -> Result<Value, Invalid> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                Ok(Value::set(items.iter().cloned()))
            }
            other => Err(
                Invalid::new(node, format!("\"{other}\" is not iterable")).with_value(other.clone()),
            ),
        }
    }
}

impl SchemaType for Set {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        Self::coerce(node, appstruct)
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        Self::coerce(node, cstruct)
    }
}
