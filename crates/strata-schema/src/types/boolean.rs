//! # Boolean Type
//!
//! Serializes `Bool` to configurable text and deserializes text leniently.
//! Deserialization is intentionally lossy: any text not listed as false
//! (`"yes"`, `"1"`, `"on"`, ...) becomes `true` unless explicit true
//! choices are configured.

use serde::{Deserialize, Serialize};
use strata_core::Value;

use super::SchemaType;
use crate::invalid::Invalid;
use crate::node::SchemaNode;

/// Configuration for [`Boolean`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanOptions {
    /// Lowercased inputs that deserialize to `false`.
    pub false_choices: Vec<String>,
    /// Lowercased inputs that deserialize to `true`. When empty, every
    /// input not in `false_choices` is true.
    pub true_choices: Vec<String>,
    /// Serialized form of `false`.
    pub false_val: String,
    /// Serialized form of `true`.
    pub true_val: String,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            false_choices: vec!["false".to_string(), "0".to_string()],
            true_choices: Vec::new(),
            false_val: "false".to_string(),
            true_val: "true".to_string(),
        }
    }
}

/// Boolean type.
#[derive(Debug, Clone)]
pub struct Boolean {
    false_choices: Vec<String>,
    true_choices: Vec<String>,
    false_val: String,
    true_val: String,
}

impl Default for Boolean {
    fn default() -> Self {
        Self::from_options(BooleanOptions::default())
    }
}

impl Boolean {
    /// A boolean with the default choices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from options. Choices are matched case-insensitively.
    ///
    /// The serialized forms are always accepted on input so that
    /// serialization stays invertible with custom `false_val`/`true_val`.
    pub fn from_options(options: BooleanOptions) -> Self {
        let lower = |items: Vec<String>| -> Vec<String> {
            items.into_iter().map(|s| s.to_lowercase()).collect()
        };
        Self {
            false_choices: lower(options.false_choices),
            true_choices: lower(options.true_choices),
            false_val: options.false_val,
            true_val: options.true_val,
        }
    }

    fn text(cstruct: &Value) -> Option<String> {
        match cstruct {
            Value::Str(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(x) => Some(x.to_string()),
            _ => None,
        }
    }
}

impl SchemaType for Boolean {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        match appstruct {
            Value::Null => Ok(Value::Null),
            Value::Bool(true) => Ok(Value::Str(self.true_val.clone())),
            Value::Bool(false) => Ok(Value::Str(self.false_val.clone())),
            other => Err(
                Invalid::new(node, format!("\"{other}\" is not a boolean")).with_value(other.clone()),
            ),
        }
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        if cstruct.is_null() {
            return Ok(Value::Null);
        }
        let text = Self::text(cstruct)
            .ok_or_else(|| {
                Invalid::new(node, format!("{cstruct} is not a string")).with_value(cstruct.clone())
            })?
            .to_lowercase();

        if self.false_choices.contains(&text) || text == self.false_val.to_lowercase() {
            return Ok(Value::Bool(false));
        }
        if self.true_choices.is_empty() || text == self.true_val.to_lowercase() {
            return Ok(Value::Bool(true));
        }
        if self.true_choices.contains(&text) {
            return Ok(Value::Bool(true));
        }
        Err(Invalid::new(
            node,
            format!(
                "\"{cstruct}\" is neither in ({}) nor in ({})",
                self.false_choices.join(", "),
                self.true_choices.join(", ")
            ),
        )
        .with_value(cstruct.clone()))
    }
}
