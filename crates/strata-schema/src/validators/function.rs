//! # Predicate Validator
//!
//! Wraps a plain predicate over the value. Unlike a closure validator, the
//! predicate never builds an [`Invalid`] itself: it answers with a [`Check`]
//! and the validator attaches the node and message.

use std::fmt;

use strata_core::Value;

use super::{interpolate, Validator};
use crate::invalid::Invalid;
use crate::node::SchemaNode;

const DEFAULT_MESSAGE: &str = "Invalid value";

/// Outcome of a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// The value is acceptable.
    Pass,
    /// The value is rejected with the validator's message.
    Fail,
    /// The value is rejected with this message.
    FailWith(String),
}

impl From<bool> for Check {
    fn from(ok: bool) -> Self {
        if ok {
            Check::Pass
        } else {
            Check::Fail
        }
    }
}

/// Validator built from a predicate.
pub struct Function<F> {
    predicate: F,
    message: String,
}

impl<F> fmt::Debug for Function<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("message", &self.message).finish_non_exhaustive()
    }
}

impl<F> Function<F>
where
    F: Fn(&Value) -> Check + Send + Sync,
{
    /// Wrap `predicate` with the default message.
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Replace the message used for [`Check::Fail`]. `${val}` is substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl<F> Validator for Function<F>
where
    F: Fn(&Value) -> Check + Send + Sync,
{
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        let template = match (self.predicate)(value) {
            Check::Pass => return Ok(()),
            Check::Fail => self.message.clone(),
            Check::FailWith(message) => message,
        };
        Err(Invalid::new(node, interpolate(&template, &[("val", value.to_string())]))
            .with_value(value.clone()))
    }
}
