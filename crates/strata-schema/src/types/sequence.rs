//! # Sequence Type
//!
//! A repeated composite: any number of items, each described by the node's
//! single child. Item failures are collected by index.

use serde::{Deserialize, Serialize};
use strata_core::{Flattened, StrataError, Value};

use super::children::{only_child, ChildLayout};
use super::{Direction, SchemaType};
use crate::invalid::Invalid;
use crate::node::SchemaNode;

/// Configuration for [`Sequence`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceOptions {
    /// Wrap a non-sequence input in a one-item list instead of rejecting it.
    pub accept_scalar: bool,
}

/// Repeated composite type.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    accept_scalar: bool,
}

impl Sequence {
    /// A sequence that rejects scalars.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence that wraps scalars into one-item lists.
    pub fn accepting_scalars() -> Self {
        Self { accept_scalar: true }
    }

    /// Build from deserialized options.
    pub fn from_options(options: SequenceOptions) -> Self {
        Self {
            accept_scalar: options.accept_scalar,
        }
    }

    fn coerce(&self, node: &SchemaNode, value: &Value) -> Result<Vec<Value>, Invalid> {
        match value {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Ok(items.clone()),
            other if self.accept_scalar => Ok(vec![other.clone()]),
            other => Err(
                Invalid::new(node, format!("\"{other}\" is not iterable")).with_value(other.clone()),
            ),
        }
    }

    fn convert(&self, node: &SchemaNode, value: &Value, direction: Direction) -> Result<Value, Invalid> {
        let template = only_child(node)
            .map_err(|_| Invalid::new(node, "Sequence schema must have exactly one child node"))?;
        let items = self.coerce(node, value)?;
        tracing::debug!(
            node = node.name(),
            items = items.len(),
            direction = direction.label(),
            "converting sequence"
        );

        let mut error: Option<Invalid> = None;
        let mut result = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if item.is_null() && template.default_value().is_drop() {
                continue;
            }
            match direction.apply(template, item) {
                Ok(converted) => {
                    if converted.is_null() && direction.drops(template) {
                        continue;
                    }
                    result.push(converted);
                }
                Err(exc) => {
                    error.get_or_insert_with(|| Invalid::bare(node)).add(exc, Some(index));
                }
            }
        }

        match error {
            Some(exc) => Err(exc),
            None => Ok(Value::List(result)),
        }
    }
}

impl SchemaType for Sequence {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        if appstruct.is_null() {
            return Ok(Value::Null);
        }
        self.convert(node, appstruct, Direction::Serialize)
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        if cstruct.is_null() {
            return Ok(Value::Null);
        }
        self.convert(node, cstruct, Direction::Deserialize)
    }

    /// The items themselves; the single child is a template, not a slot.
    fn cstruct_children(&self, _node: &SchemaNode, cstruct: &Value) -> Vec<Value> {
        cstruct.as_items().map(<[Value]>::to_vec).unwrap_or_default()
    }

    fn is_positional(&self) -> bool {
        true
    }

    fn flatten(
        &self,
        node: &SchemaNode,
        appstruct: &Value,
        prefix: &str,
        listitem: bool,
    ) -> Result<Flattened, StrataError> {
        ChildLayout::Repeated.flatten(node, appstruct, prefix, listitem)
    }

    fn unflatten(
        &self,
        node: &SchemaNode,
        paths: &[String],
        fstruct: &Flattened,
    ) -> Result<Value, StrataError> {
        ChildLayout::Repeated.unflatten(node, paths, fstruct)
    }

    fn get_value(&self, node: &SchemaNode, appstruct: &Value, path: &str) -> Result<Value, StrataError> {
        ChildLayout::Repeated.get_value(node, appstruct, path)
    }

    fn set_value(
        &self,
        node: &SchemaNode,
        appstruct: &mut Value,
        path: &str,
        value: Value,
    ) -> Result<(), StrataError> {
        ChildLayout::Repeated.set_value(node, appstruct, path, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Int, Mapping, Str};

    fn ints(accept_scalar: bool) -> SchemaNode {
        let typ = if accept_scalar {
            Sequence::accepting_scalars()
        } else {
            Sequence::new()
        };
        SchemaNode::builder(typ)
            .name("ints")
            .child(SchemaNode::named("int", Int::new()))
            .build()
    }

    #[test]
    fn test_round_trip() {
        let node = ints(false);
        let cstruct = Value::List(vec![Value::from("1"), Value::from("2")]);
        let app = node.deserialize(&cstruct).unwrap();
        assert_eq!(app, Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(node.serialize(&app).unwrap(), cstruct);
    }

    #[test]
    fn test_scalar_handling() {
        let err = ints(false).deserialize(&Value::from("1")).unwrap_err();
        assert_eq!(err.messages(), ["\"1\" is not iterable"]);
        let app = ints(true).deserialize(&Value::from("1")).unwrap();
        assert_eq!(app, Value::List(vec![Value::Int(1)]));
    }

    #[test]
    fn test_item_failures_are_positional() {
        let node = ints(false);
        let cstruct = Value::List(vec![Value::from("1"), Value::from("x"), Value::from("y")]);
        let err = node.deserialize(&cstruct).unwrap_err();
        let keys: Vec<String> = err.children().iter().map(Invalid::keyname).collect();
        assert_eq!(keys, ["1", "2"]);
        assert!(err.children().iter().all(Invalid::is_positional));
    }

    #[test]
    fn test_null_passthrough() {
        let node = ints(false);
        assert_eq!(node.typ().serialize(&node, &Value::Null).unwrap(), Value::Null);
        assert_eq!(node.typ().deserialize(&node, &Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_requires_single_child() {
        let node = SchemaNode::new(Sequence::new());
        let err = node.deserialize(&Value::List(vec![])).unwrap_err();
        assert_eq!(err.messages(), ["Sequence schema must have exactly one child node"]);
    }

    #[test]
    fn test_cstruct_children_are_items() {
        let node = ints(false);
        let items = vec![Value::from("1"), Value::from("2"), Value::from("3")];
        assert_eq!(node.cstruct_children(&Value::List(items.clone())), items);
        assert!(node.cstruct_children(&Value::Null).is_empty());
        assert!(node.cstruct_children(&Value::from("abc")).is_empty());
    }

    #[test]
    fn test_flatten_nested() {
        let node = SchemaNode::builder(Sequence::new())
            .name("people")
            .child(
                SchemaNode::builder(Mapping::new())
                    .name("person")
                    .child(SchemaNode::named("name", Str::new()))
                    .build(),
            )
            .build();
        let app = Value::List(vec![
            Value::map([("name", Value::from("a"))]),
            Value::map([("name", Value::from("b"))]),
        ]);
        let flat = node.flatten(&app).unwrap();
        assert_eq!(flat.get("people.0.name"), Some(&Value::from("a")));
        assert_eq!(flat.get("people.1.name"), Some(&Value::from("b")));
        assert_eq!(node.unflatten(&flat).unwrap(), app);
    }

    #[test]
    fn test_get_and_set_by_index() {
        let node = ints(false);
        let mut app = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(node.get_value(&app, "1").unwrap(), Value::Int(2));
        node.set_value(&mut app, "0", Value::Int(9)).unwrap();
        assert_eq!(app, Value::List(vec![Value::Int(9), Value::Int(2)]));
        assert!(matches!(node.get_value(&app, "7"), Err(StrataError::BadIndex { .. })));
        assert!(matches!(node.get_value(&app, "x"), Err(StrataError::BadIndex { .. })));
    }
}
