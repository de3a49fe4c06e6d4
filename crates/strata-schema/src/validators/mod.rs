//! # Validators: the Validation Extension Point
//!
//! A [`Validator`] inspects an already-deserialized appstruct and either
//! accepts it or fails with an [`Invalid`] attributed to the node. Node
//! validators run in declaration order after the type succeeds, and the
//! first failure stops the chain. Use [`All`] to collect every failure.
//!
//! Any closure `Fn(&SchemaNode, &Value) -> Result<(), Invalid>` is a
//! validator, so ad-hoc rules need no new type.
//!
//! ## Messages
//!
//! Built-in validators take message templates. `${val}` is replaced by the
//! rejected value; range and length validators also substitute `${min}` and
//! `${max}`, choice validators `${choices}`.
//!
//! ## Wrong-Kind Input
//!
//! A validator handed a value it cannot inspect (text to [`Length`] is fine,
//! a boolean is not) fails with an `Invalid` rather than panicking.

use strata_core::Value;

use crate::invalid::Invalid;
use crate::node::SchemaNode;

pub mod choice;
pub mod compose;
pub mod function;
pub mod luhn;
pub mod pattern;
pub mod range;

pub use choice::{ContainsOnly, NoneOf, OneOf};
pub use compose::{All, Any};
pub use function::{Check, Function};
pub use luhn::{luhn_checksum, Luhn};
pub use pattern::{Email, Regex, Url, UuidValidator};
pub use range::{Length, Range};

/// A check run against a deserialized appstruct.
pub trait Validator: Send + Sync {
    /// Accept `value` or fail with an [`Invalid`] naming `node`.
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid>;
}

impl<F> Validator for F
where
    F: Fn(&SchemaNode, &Value) -> Result<(), Invalid> + Send + Sync,
{
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        self(node, value)
    }
}

/// Substitute `${name}` placeholders in a message template.
pub(crate) fn interpolate(template: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("${{{name}}}"), value)
    })
}

/// Render choices for a message: `a, b, c`.
pub(crate) fn join_values(values: &[Value]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
