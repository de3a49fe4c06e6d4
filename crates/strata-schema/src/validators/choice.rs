//! # Choice Validators

use strata_core::Value;

use super::{interpolate, join_values, Validator};
use crate::invalid::Invalid;
use crate::node::SchemaNode;

/// Accepts only values equal to one of the choices.
#[derive(Debug, Clone)]
pub struct OneOf {
    choices: Vec<Value>,
    message: String,
}

impl OneOf {
    /// A validator accepting exactly `choices`.
    pub fn new(choices: impl IntoIterator<Item = Value>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            message: "\"${val}\" is not one of ${choices}".to_string(),
        }
    }

    /// Replace the failure message. `${val}` and `${choices}` are substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for OneOf {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        if self.choices.contains(value) {
            return Ok(());
        }
        let vars = [("val", value.to_string()), ("choices", join_values(&self.choices))];
        Err(Invalid::new(node, interpolate(&self.message, &vars)).with_value(value.clone()))
    }
}

/// Rejects values equal to any of the choices.
#[derive(Debug, Clone)]
pub struct NoneOf {
    choices: Vec<Value>,
    message: String,
}

impl NoneOf {
    /// A validator rejecting `choices`.
    pub fn new(choices: impl IntoIterator<Item = Value>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            message: "\"${val}\" must not be one of ${choices}".to_string(),
        }
    }

    /// Replace the failure message. `${val}` and `${choices}` are substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for NoneOf {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        if !self.choices.contains(value) {
            return Ok(());
        }
        let vars = [("val", value.to_string()), ("choices", join_values(&self.choices))];
        Err(Invalid::new(node, interpolate(&self.message, &vars)).with_value(value.clone()))
    }
}

/// Accepts collections whose every item is one of the choices.
///
/// Text is treated as a collection of one-character strings.
#[derive(Debug, Clone)]
pub struct ContainsOnly {
    choices: Vec<Value>,
    message: String,
}

impl ContainsOnly {
    /// A validator restricting items to `choices`.
    pub fn new(choices: impl IntoIterator<Item = Value>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            message: "One or more of the choices you made was not acceptable".to_string(),
        }
    }

    /// Replace the failure message. `${val}` and `${choices}` are substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for ContainsOnly {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        let items: Vec<Value> = match value {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => items.clone(),
            Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string())).collect(),
            Value::Map(entries) => entries.keys().map(|k| Value::Str(k.clone())).collect(),
            other => {
                return Err(Invalid::new(node, format!("\"{other}\" is not iterable"))
                    .with_value(other.clone()))
            }
        };
        if items.iter().all(|item| self.choices.contains(item)) {
            return Ok(());
        }
        let vars = [("val", value.to_string()), ("choices", join_values(&self.choices))];
        Err(Invalid::new(node, interpolate(&self.message, &vars)).with_value(value.clone()))
    }
}
