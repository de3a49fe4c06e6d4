//! # Tuple Type
//!
//! A positional composite of fixed arity: item `i` is described by child
//! `i`. The input must have exactly as many items as there are children.

use strata_core::{Flattened, StrataError, Value};

use super::children::ChildLayout;
use super::{Direction, SchemaType};
use crate::invalid::Invalid;
use crate::node::SchemaNode;

/// Fixed-arity positional composite type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tuple;

impl Tuple {
    /// A tuple type.
    pub fn new() -> Self {
        Self
    }

    fn coerce(node: &SchemaNode, value: &Value) -> Result<Vec<Value>, Invalid> {
        let items = match value {
            Value::List(items) | Value::Tuple(items) => items,
            other => {
                return Err(
                    Invalid::new(node, format!("\"{other}\" is not iterable")).with_value(other.clone())
                )
            }
        };
        let expected = node.children().len();
        if items.len() != expected {
            return Err(Invalid::new(
                node,
                format!(
                    "\"{value}\" has an incorrect number of elements (expected {expected}, was {})",
                    items.len()
                ),
            )
            .with_value(value.clone()));
        }
        Ok(items.clone())
    }

    fn convert(node: &SchemaNode, value: &Value, direction: Direction) -> Result<Value, Invalid> {
        let items = Self::coerce(node, value)?;
        tracing::debug!(
            node = node.name(),
            items = items.len(),
            direction = direction.label(),
            "converting tuple"
        );

        let mut error: Option<Invalid> = None;
        let mut result = Vec::with_capacity(items.len());
        for (index, (child, item)) in node.children().iter().zip(&items).enumerate() {
            match direction.apply(child, item) {
                Ok(converted) => result.push(converted),
                Err(exc) => error.get_or_insert_with(|| Invalid::bare(node)).add(exc, Some(index)),
            }
        }

        match error {
            Some(exc) => Err(exc),
            None => Ok(Value::Tuple(result)),
        }
    }
}

impl SchemaType for Tuple {
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
        if appstruct.is_null() {
            return Ok(Value::Null);
        }
        Self::convert(node, appstruct, Direction::Serialize)
    }

    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
        if cstruct.is_null() {
            return Ok(Value::Null);
        }
        Self::convert(node, cstruct, Direction::Deserialize)
    }

    /// One entry per child: padded with the sentinel, or truncated.
    fn cstruct_children(&self, node: &SchemaNode, cstruct: &Value) -> Vec<Value> {
        let items = match cstruct {
            Value::List(items) | Value::Tuple(items) => items.as_slice(),
            _ => &[],
        };
        (0..node.children().len())
            .map(|i| items.get(i).cloned().unwrap_or(Value::Null))
            .collect()
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
        ChildLayout::Positional.flatten(node, appstruct, prefix, listitem)
    }

    fn unflatten(
        &self,
        node: &SchemaNode,
        paths: &[String],
        fstruct: &Flattened,
    ) -> Result<Value, StrataError> {
        ChildLayout::Positional.unflatten(node, paths, fstruct)
    }

    fn get_value(&self, node: &SchemaNode, appstruct: &Value, path: &str) -> Result<Value, StrataError> {
        ChildLayout::Positional.get_value(node, appstruct, path)
    }

    fn set_value(
        &self,
        node: &SchemaNode,
        appstruct: &mut Value,
        path: &str,
        value: Value,
    ) -> Result<(), StrataError> {
        ChildLayout::Positional.set_value(node, appstruct, path, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Boolean, Int, Sequence, Str};

    fn point() -> SchemaNode {
        SchemaNode::builder(Tuple::new())
            .name("point")
            .child(SchemaNode::named("x", Int::new()))
            .child(SchemaNode::named("label", Str::new()))
            .build()
    }

    #[test]
    fn test_round_trip() {
        let node = point();
        let cstruct = Value::Tuple(vec![Value::from("3"), Value::from("origin")]);
        let app = node.deserialize(&cstruct).unwrap();
        assert_eq!(app, Value::Tuple(vec![Value::Int(3), Value::from("origin")]));
        assert_eq!(node.serialize(&app).unwrap(), cstruct);
    }

    #[test]
    fn test_wrong_arity() {
        let node = point();
        let err = node.deserialize(&Value::List(vec![Value::from("1")])).unwrap_err();
        assert_eq!(
            err.messages(),
            ["\"[\"1\"]\" has an incorrect number of elements (expected 2, was 1)"]
        );
    }

    #[test]
    fn test_not_iterable() {
        let err = point().deserialize(&Value::Int(1)).unwrap_err();
        assert_eq!(err.messages(), ["\"1\" is not iterable"]);
    }

    #[test]
    fn test_child_failures_by_position() {
        let node = point();
        let err = node
            .deserialize(&Value::List(vec![Value::from("x"), Value::from("")]))
            .unwrap_err();
        assert_eq!(err.children().len(), 2);
        assert_eq!(err.children()[0].keyname(), "0");
        assert_eq!(err.children()[1].keyname(), "1");
        assert_eq!(err.children()[1].messages(), ["Required"]);
    }

    #[test]
    fn test_cstruct_children_pads_and_truncates() {
        let node = point();
        assert_eq!(
            node.cstruct_children(&Value::List(vec![Value::from("1")])),
            vec![Value::from("1"), Value::Null]
        );
        assert_eq!(
            node.cstruct_children(&Value::List(vec![
                Value::from("1"),
                Value::from("a"),
                Value::from("extra"),
            ])),
            vec![Value::from("1"), Value::from("a")]
        );
        assert_eq!(node.cstruct_children(&Value::Bool(true)), vec![Value::Null, Value::Null]);
    }

    #[test]
    fn test_flatten_and_access() {
        let node = SchemaNode::builder(Tuple::new())
            .name("pair")
            .child(SchemaNode::named("a", Int::new()))
            .child(SchemaNode::named("b", Boolean::new()))
            .build();
        let mut app = Value::Tuple(vec![Value::Int(1), Value::Bool(true)]);
        let flat = node.flatten(&app).unwrap();
        assert_eq!(flat.get("pair.a"), Some(&Value::Int(1)));
        assert_eq!(flat.get("pair.b"), Some(&Value::Bool(true)));
        assert_eq!(node.unflatten(&flat).unwrap(), app);

        assert_eq!(node.get_value(&app, "1").unwrap(), Value::Bool(true));
        node.set_value(&mut app, "0", Value::Int(5)).unwrap();
        assert_eq!(app, Value::Tuple(vec![Value::Int(5), Value::Bool(true)]));
    }

    #[test]
    fn test_flatten_round_trips_empty_sequence_child() {
        let node = SchemaNode::builder(Tuple::new())
            .name("t")
            .child(SchemaNode::named("n", Int::new()))
            .child(
                SchemaNode::builder(Sequence::new())
                    .name("xs")
                    .child(SchemaNode::named("x", Int::new()))
                    .build(),
            )
            .build();
        let app = Value::Tuple(vec![Value::Int(1), Value::List(vec![])]);
        let flat = node.flatten(&app).unwrap();
        assert_eq!(flat.keys().collect::<Vec<_>>(), ["t.n"]);
        assert_eq!(node.unflatten(&flat).unwrap(), app);
    }

    #[test]
    fn test_flatten_absent_item_is_sentinel() {
        let node = SchemaNode::builder(Tuple::new())
            .name("t")
            .child(SchemaNode::named("n", Int::new()))
            .child(
                SchemaNode::builder(Tuple::new())
                    .name("inner")
                    .child(SchemaNode::named("a", Int::new()))
                    .build(),
            )
            .build();
        let app = Value::Tuple(vec![Value::Int(1), Value::Null]);
        let flat = node.flatten(&app).unwrap();
        assert_eq!(flat.get("t.inner"), Some(&Value::Null));
        assert_eq!(node.unflatten(&flat).unwrap(), app);
    }
}
