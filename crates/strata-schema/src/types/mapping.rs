//! # Mapping Type
//!
//! A keyed composite: one child node per expected key. Children are
//! (de)serialized through their own nodes so missing/default policies and
//! validators apply per field. Child failures are collected under a single
//! parent [`Invalid`] rather than stopping at the first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strata_core::{Flattened, StrataError, Value};

use super::children::ChildLayout;
use super::{Direction, SchemaType};
use crate::invalid::Invalid;
use crate::node::SchemaNode;

/// Policy for keys in the input that no child node describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unknown {
    /// Drop unknown keys.
    #[default]
    Ignore,
    /// Reject the mapping.
    Raise,
    /// Copy unknown keys into the output unchanged.
    Preserve,
}

/// Configuration for [`Mapping`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingOptions {
    /// Unknown-key policy.
    pub unknown: Unknown,
}

/// Keyed composite type.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    unknown: Unknown,
}

impl Mapping {
    /// A mapping that ignores unknown keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping with the given unknown-key policy.
    pub fn with_unknown(unknown: Unknown) -> Self {
        Self { unknown }
    }

    /// Build from deserialized options.
    pub fn from_options(options: MappingOptions) -> Self {
        Self::with_unknown(options.unknown)
    }

    /// The unknown-key policy.
    pub fn unknown(&self) -> Unknown {
        self.unknown
    }

    fn coerce(node: &SchemaNode, value: &Value) -> Result<BTreeMap<String, Value>, Invalid> {
        match value {
            Value::Map(entries) => Ok(entries.clone()),
            other => Err(
                Invalid::new(node, format!("\"{other}\" is not a mapping type"))
                    .with_value(other.clone()),
            ),
        }
    }

    fn convert(&self, node: &SchemaNode, value: &Value, direction: Direction) -> Result<Value, Invalid> {
        let mut remaining = Self::coerce(node, value)?;
        tracing::debug!(
            node = node.name(),
            children = node.children().len(),
            direction = direction.label(),
            "converting mapping"
        );

        let mut error: Option<Invalid> = None;
        let mut result = BTreeMap::new();
        for (index, child) in node.children().iter().enumerate() {
            let subval = remaining.remove(child.name()).unwrap_or(Value::Null);
            if subval.is_null() && child.default_value().is_drop() {
                continue;
            }
            match direction.apply(child, &subval) {
                Ok(converted) => {
                    if converted.is_null() && direction.drops(child) {
                        tracing::trace!(node = node.name(), child = child.name(), "dropped");
                        continue;
                    }
                    result.insert(child.name().to_string(), converted);
                }
                Err(exc) => {
                    tracing::trace!(node = node.name(), child = child.name(), "child failed");
                    error.get_or_insert_with(|| Invalid::bare(node)).add(exc, Some(index));
                }
            }
        }

        match self.unknown {
            Unknown::Raise if !remaining.is_empty() => {
                let unknown = Value::Map(remaining);
                return Err(
                    Invalid::new(node, format!("Unrecognized keys in mapping: \"{unknown}\""))
                        .with_value(unknown),
                );
            }
            Unknown::Preserve => result.extend(remaining),
            _ => {}
        }

        match error {
            Some(exc) => Err(exc),
            None => Ok(Value::Map(result)),
        }
    }
}

impl SchemaType for Mapping {
    /// The sentinel serializes as an empty mapping so child defaults apply.
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        let empty = Value::Map(BTreeMap::new());
        let appstruct = if appstruct.is_null() { &empty } else { appstruct };
        self.convert(node, appstruct, Direction::Serialize)
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        if cstruct.is_null() {
            return Ok(Value::Null);
        }
        self.convert(node, cstruct, Direction::Deserialize)
    }

    /// Keys missing from a mapping take the child's serialized default.
    /// Anything that is not a mapping yields one sentinel per child.
    fn cstruct_children(&self, node: &SchemaNode, cstruct: &Value) -> Vec<Value> {
        let Some(entries) = cstruct.as_map() else {
            return vec![Value::Null; node.children().len()];
        };
        node.children()
            .iter()
            .map(|child| {
                let sub = entries.get(child.name()).cloned().unwrap_or(Value::Null);
                if sub.is_null() {
                    child.serialize(&Value::Null).unwrap_or(Value::Null)
                } else {
                    sub
                }
            })
            .collect()
    }

    fn flatten(
        &self,
        node: &SchemaNode,
        appstruct: &Value,
        prefix: &str,
        listitem: bool,
    ) -> Result<Flattened, StrataError> {
        ChildLayout::Keyed.flatten(node, appstruct, prefix, listitem)
    }

    fn unflatten(
        &self,
        node: &SchemaNode,
        paths: &[String],
        fstruct: &Flattened,
    ) -> Result<Value, StrataError> {
        ChildLayout::Keyed.unflatten(node, paths, fstruct)
    }

    fn get_value(&self, node: &SchemaNode, appstruct: &Value, path: &str) -> Result<Value, StrataError> {
        ChildLayout::Keyed.get_value(node, appstruct, path)
    }

    fn set_value(
        &self,
        node: &SchemaNode,
        appstruct: &mut Value,
        path: &str,
        value: Value,
    ) -> Result<(), StrataError> {
        ChildLayout::Keyed.set_value(node, appstruct, path, value)
    }
}
