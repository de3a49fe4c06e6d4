//! # Composite Validators
//!
//! [`All`] runs every inner validator and reports all of their failures at
//! once; [`Any`] passes as soon as one inner validator passes. In both cases
//! the reported failure carries the messages and child failures of every
//! inner failure, in order, on the validated node.

use std::fmt;
use std::sync::Arc;

use strata_core::Value;

use super::Validator;
use crate::invalid::Invalid;
use crate::node::SchemaNode;

fn merge(node: &SchemaNode, value: &Value, failures: Vec<Invalid>) -> Invalid {
    let mut messages = Vec::new();
    let mut children = Vec::new();
    for failure in failures {
        messages.extend(failure.messages().iter().cloned());
        children.extend(failure.into_children());
    }
    let mut merged = Invalid::bare(node).with_messages(messages).with_value(value.clone());
    merged.extend_children(children);
    merged
}

/// Requires every inner validator to pass.
#[derive(Clone, Default)]
pub struct All {
    validators: Vec<Arc<dyn Validator>>,
}

impl All {
    /// An empty conjunction, which accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inner validator.
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Add a shared inner validator.
    pub fn with_shared(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }
}

impl fmt::Debug for All {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All").field("validators", &self.validators.len()).finish()
    }
}

impl Validator for All {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        let failures: Vec<Invalid> = self
            .validators
            .iter()
            .filter_map(|v| v.validate(node, value).err())
            .collect();
        if failures.is_empty() {
            return Ok(());
        }
        tracing::trace!(node = node.name(), failures = failures.len(), "All: merging failures");
        Err(merge(node, value, failures))
    }
}

/// Requires at least one inner validator to pass.
///
/// An empty `Any` accepts everything.
#[derive(Clone, Default)]
pub struct Any {
    validators: Vec<Arc<dyn Validator>>,
}

impl Any {
    /// An empty disjunction, which accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inner validator.
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Add a shared inner validator.
    pub fn with_shared(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any").field("validators", &self.validators.len()).finish()
    }
}

impl Validator for Any {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        let mut failures = Vec::with_capacity(self.validators.len());
        for validator in &self.validators {
            match validator.validate(node, value) {
                Ok(()) => return Ok(()),
                Err(failure) => failures.push(failure),
            }
        }
        if failures.is_empty() {
            return Ok(());
        }
        Err(merge(node, value, failures))
    }
}
