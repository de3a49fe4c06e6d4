//! # Range and Length Validators
//!
//! Both validators take optional inclusive bounds. Constructing one with
//! `min > max` is accepted but logged, since nothing can pass it.

use std::cmp::Ordering;

use strata_core::Value;

use super::{interpolate, Validator};
use crate::invalid::Invalid;
use crate::node::SchemaNode;

const RANGE_MIN_ERR: &str = "${val} is less than minimum value ${min}";
const RANGE_MAX_ERR: &str = "${val} is greater than maximum value ${max}";
const LENGTH_MIN_ERR: &str = "Shorter than minimum length ${min}";
const LENGTH_MAX_ERR: &str = "Longer than maximum length ${max}";

/// Inclusive bounds on comparable values (numbers, text, temporals).
#[derive(Debug, Clone)]
pub struct Range {
    min: Option<Value>,
    max: Option<Value>,
    min_err: String,
    max_err: String,
}

impl Range {
    /// Bounds on the value itself. Either side may be open.
    pub fn new(min: Option<Value>, max: Option<Value>) -> Self {
        if let (Some(lo), Some(hi)) = (&min, &max) {
            if lo.compare(hi) == Some(Ordering::Greater) {
                tracing::warn!(min = %lo, max = %hi, "Range: min exceeds max, no value can pass");
            }
        }
        Self {
            min,
            max,
            min_err: RANGE_MIN_ERR.to_string(),
            max_err: RANGE_MAX_ERR.to_string(),
        }
    }

    /// Replace the too-small message. `${val}` and `${min}` are substituted.
    pub fn with_min_err(mut self, template: impl Into<String>) -> Self {
        self.min_err = template.into();
        self
    }

    /// Replace the too-large message. `${val}` and `${max}` are substituted.
    pub fn with_max_err(mut self, template: impl Into<String>) -> Self {
        self.max_err = template.into();
        self
    }

    fn vars(&self, value: &Value) -> [(&'static str, String); 3] {
        let render = |bound: &Option<Value>| bound.as_ref().map(ToString::to_string).unwrap_or_default();
        [
            ("val", value.to_string()),
            ("min", render(&self.min)),
            ("max", render(&self.max)),
        ]
    }

    fn compare(node: &SchemaNode, value: &Value, bound: &Value) -> Result<Ordering, Invalid> {
        value.compare(bound).ok_or_else(|| {
            Invalid::new(node, format!("\"{value}\" cannot be compared with {bound}"))
                .with_value(value.clone())
        })
    }
}

impl Validator for Range {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        if let Some(min) = &self.min {
            if Self::compare(node, value, min)? == Ordering::Less {
                return Err(Invalid::new(node, interpolate(&self.min_err, &self.vars(value)))
                    .with_value(value.clone()));
            }
        }
        if let Some(max) = &self.max {
            if Self::compare(node, value, max)? == Ordering::Greater {
                return Err(Invalid::new(node, interpolate(&self.max_err, &self.vars(value)))
                    .with_value(value.clone()));
            }
        }
        Ok(())
    }
}

/// Inclusive bounds on the length of text (in characters) or a collection.
#[derive(Debug, Clone)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    min_err: String,
    max_err: String,
}

impl Length {
    /// Bounds on the length. Either side may be open.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                tracing::warn!(min = lo, max = hi, "Length: min exceeds max, no value can pass");
            }
        }
        Self {
            min,
            max,
            min_err: LENGTH_MIN_ERR.to_string(),
            max_err: LENGTH_MAX_ERR.to_string(),
        }
    }

    /// Replace the too-short message. `${val}` and `${min}` are substituted.
    pub fn with_min_err(mut self, template: impl Into<String>) -> Self {
        self.min_err = template.into();
        self
    }

    /// Replace the too-long message. `${val}` and `${max}` are substituted.
    pub fn with_max_err(mut self, template: impl Into<String>) -> Self {
        self.max_err = template.into();
        self
    }
}

impl Validator for Length {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        let len = value.len().ok_or_else(|| {
            Invalid::new(node, format!("\"{value}\" has no length")).with_value(value.clone())
        })?;
        let vars = [
            ("val", value.to_string()),
            ("min", self.min.map(|m| m.to_string()).unwrap_or_default()),
            ("max", self.max.map(|m| m.to_string()).unwrap_or_default()),
        ];
        if self.min.is_some_and(|min| len < min) {
            return Err(Invalid::new(node, interpolate(&self.min_err, &vars)).with_value(value.clone()));
        }
        if self.max.is_some_and(|max| len > max) {
            return Err(Invalid::new(node, interpolate(&self.max_err, &vars)).with_value(value.clone()));
        }
        Ok(())
    }
}
