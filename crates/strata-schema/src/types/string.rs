//! # Text Type
//!
//! Empty text is logically null: deserializing `""` yields the sentinel
//! unless `allow_empty` is set. Text that merely looks falsy, such as
//! `"0"`, is kept.

use serde::{Deserialize, Serialize};
use strata_core::Value;

use super::SchemaType;
use crate::invalid::Invalid;
use crate::node::SchemaNode;

/// Configuration for [`Str`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrOptions {
    /// Deserialize `""` to `""` instead of the sentinel.
    pub allow_empty: bool,
}

/// Text type.
#[derive(Debug, Clone, Default)]
pub struct Str {
    allow_empty: bool,
}

impl Str {
    /// A text type that treats `""` as absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// A text type that keeps `""`.
    pub fn allowing_empty() -> Self {
        Self { allow_empty: true }
    }

    /// Build from deserialized options.
    pub fn from_options(options: StrOptions) -> Self {
        Self {
            allow_empty: options.allow_empty,
        }
    }
}

impl SchemaType for Str {
    /// Scalars are rendered as text; containers and `None` are rejected.
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        match appstruct {
            Value::Null => Ok(Value::Null),
            Value::Str(s) => Ok(Value::Str(s.clone())),
            Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Date(_)
            | Value::DateTime(_)
            | Value::Time(_) => Ok(Value::Str(appstruct.to_string())),
            other => Err(Invalid::new(node, format!("{other} cannot be serialized as text"))
                .with_value(other.clone())),
        }
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        match cstruct {
            Value::Null => Ok(Value::Null),
            Value::Str(s) if s.is_empty() && !self.allow_empty => Ok(Value::Null),
            Value::Str(s) => Ok(Value::Str(s.clone())),
            other => Err(Invalid::new(node, format!("{other} is not a string")).with_value(other.clone())),
        }
    }
}
