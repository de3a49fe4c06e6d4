//! # Schema Nodes
//!
//! A [`SchemaNode`] binds a [`SchemaType`] and zero or more [`Validator`]s
//! to a position in a schema tree. Nodes are immutable once built and cheap
//! to clone: clones share the same underlying node, and
//! [`SchemaNode::ptr_eq`] compares identity.
//!
//! ## Missing and Default Values
//!
//! A node layers two policies on top of its type:
//!
//! - [`Missing`] decides what deserialization yields when the type returns
//!   the null sentinel. The default is [`Missing::Required`].
//! - [`DefaultValue`] decides what serialization starts from when handed
//!   the null sentinel. The default is the sentinel itself.
//!
//! Missing values are never validated.

use std::fmt;
use std::sync::Arc;

use strata_core::{Flattened, StrataError, Value};

use crate::invalid::Invalid;
use crate::types::SchemaType;
use crate::validators::Validator;

/// What deserialization yields when no value was supplied.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Missing {
    /// Fail with `Invalid("Required")`.
    #[default]
    Required,
    /// Omit the field from the enclosing mapping or sequence.
    Drop,
    /// Substitute this appstruct.
    Value(Value),
}

/// What serialization starts from when handed the null sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Omit the field from the enclosing mapping or sequence.
    Drop,
    /// Serialize this appstruct instead.
    Value(Value),
}

impl Default for DefaultValue {
    fn default() -> Self {
        DefaultValue::Value(Value::Null)
    }
}

impl DefaultValue {
    /// Returns true for [`DefaultValue::Drop`].
    pub fn is_drop(&self) -> bool {
        matches!(self, DefaultValue::Drop)
    }
}

struct NodeInner {
    name: String,
    typ: Arc<dyn SchemaType>,
    children: Vec<SchemaNode>,
    validators: Vec<Arc<dyn Validator>>,
    missing: Missing,
    default: DefaultValue,
}

/// A node in a schema tree.
#[derive(Clone)]
pub struct SchemaNode {
    inner: Arc<NodeInner>,
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNode")
            .field("name", &self.inner.name)
            .field("typ", &self.inner.typ)
            .field("children", &self.inner.children)
            .field("validators", &self.inner.validators.len())
            .field("missing", &self.inner.missing)
            .field("default", &self.inner.default)
            .finish()
    }
}

impl SchemaNode {
    /// Start building a node bound to `typ`.
    pub fn builder(typ: impl SchemaType + 'static) -> NodeBuilder {
        Self::builder_shared(Arc::new(typ))
    }

    /// Start building a node bound to a type that may be shared with
    /// other nodes.
    pub fn builder_shared(typ: Arc<dyn SchemaType>) -> NodeBuilder {
        NodeBuilder {
            name: String::new(),
            typ,
            children: Vec::new(),
            validators: Vec::new(),
            missing: Missing::default(),
            default: DefaultValue::default(),
        }
    }

    /// An unnamed node with no children or validators.
    pub fn new(typ: impl SchemaType + 'static) -> Self {
        Self::builder(typ).build()
    }

    /// A named node with no children or validators.
    pub fn named(name: impl Into<String>, typ: impl SchemaType + 'static) -> Self {
        Self::builder(typ).name(name).build()
    }

    /// The node's name. Empty for an anonymous root.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The type bound to this node.
    pub fn typ(&self) -> &dyn SchemaType {
        self.inner.typ.as_ref()
    }

    /// Child nodes in declaration order.
    pub fn children(&self) -> &[SchemaNode] {
        &self.inner.children
    }

    /// Look up a child by name.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.inner.children.iter().find(|c| c.name() == name)
    }

    /// Validators run after successful deserialization, in order.
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.inner.validators
    }

    /// The missing-value policy.
    pub fn missing(&self) -> &Missing {
        &self.inner.missing
    }

    /// The default-value policy.
    pub fn default_value(&self) -> &DefaultValue {
        &self.inner.default
    }

    /// Whether `self` and `other` are the same node.
    pub fn ptr_eq(&self, other: &SchemaNode) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Convert an appstruct to a cstruct.
    ///
    /// The null sentinel is replaced by the node's default before the type
    /// sees it. A [`DefaultValue::Drop`] default serializes as the sentinel.
    pub fn serialize(&self, appstruct: &Value) -> Result<Value, Invalid> {
        if appstruct.is_null() {
            return match &self.inner.default {
                DefaultValue::Drop => Ok(Value::Null),
                DefaultValue::Value(default) => self.typ().serialize(self, default),
            };
        }
        self.typ().serialize(self, appstruct)
    }

    /// Convert a cstruct to an appstruct and run the node's validators.
    ///
    /// When the type yields the null sentinel the [`Missing`] policy
    /// applies and validators are skipped.
    pub fn deserialize(&self, cstruct: &Value) -> Result<Value, Invalid> {
        let appstruct = self.typ().deserialize(self, cstruct)?;
        if appstruct.is_null() {
            return match &self.inner.missing {
                Missing::Required => Err(Invalid::new(self, "Required")),
                Missing::Drop => Ok(Value::Null),
                Missing::Value(v) => Ok(v.clone()),
            };
        }
        for validator in &self.inner.validators {
            validator.validate(self, &appstruct)?;
        }
        Ok(appstruct)
    }

    /// The cstruct of each child. Never fails.
    pub fn cstruct_children(&self, cstruct: &Value) -> Vec<Value> {
        self.typ().cstruct_children(self, cstruct)
    }

    /// Flatten an appstruct into dotted-path keys.
    pub fn flatten(&self, appstruct: &Value) -> Result<Flattened, StrataError> {
        self.typ().flatten(self, appstruct, "", false)
    }

    /// Rebuild an appstruct from the output of [`SchemaNode::flatten`].
    pub fn unflatten(&self, fstruct: &Flattened) -> Result<Value, StrataError> {
        let paths: Vec<String> = fstruct.keys().cloned().collect();
        self.typ().unflatten(self, &paths, fstruct)
    }

    /// Read the value at a dotted path inside `appstruct`.
    pub fn get_value(&self, appstruct: &Value, path: &str) -> Result<Value, StrataError> {
        self.typ().get_value(self, appstruct, path)
    }

    /// Write `value` at a dotted path inside `appstruct`.
    pub fn set_value(&self, appstruct: &mut Value, path: &str, value: Value) -> Result<(), StrataError> {
        self.typ().set_value(self, appstruct, path, value)
    }
}

/// Builder for [`SchemaNode`].
pub struct NodeBuilder {
    name: String,
    typ: Arc<dyn SchemaType>,
    children: Vec<SchemaNode>,
    validators: Vec<Arc<dyn Validator>>,
    missing: Missing,
    default: DefaultValue,
}

impl NodeBuilder {
    /// Set the node's name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a child node.
    pub fn child(mut self, child: SchemaNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes.
    pub fn children(mut self, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a validator.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Append a shared validator.
    pub fn shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Set the missing-value policy.
    pub fn missing(mut self, missing: Missing) -> Self {
        self.missing = missing;
        self
    }

    /// Set the default-value policy.
    pub fn default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    /// Finish the node.
    pub fn build(self) -> SchemaNode {
        SchemaNode {
            inner: Arc::new(NodeInner {
                name: self.name,
                typ: self.typ,
                children: self.children,
                validators: self.validators,
                missing: self.missing,
                default: self.default,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Boolean, Int, Str};
    use crate::validators::Range;

    #[test]
    fn test_required_by_default() {
        let node = SchemaNode::named("name", Str::new());
        let err = node.deserialize(&Value::Null).unwrap_err();
        assert_eq!(err.messages(), ["Required"]);
        assert!(err.node().ptr_eq(&node));
        // Empty text is logically null for Str.
        assert!(node.deserialize(&Value::from("")).is_err());
    }

    #[test]
    fn test_missing_value_is_not_validated() {
        let node = SchemaNode::builder(Int::new())
            .name("age")
            .validator(Range::new(Some(Value::Int(18)), None))
            .missing(Missing::Value(Value::Int(0)))
            .build();
        assert_eq!(node.deserialize(&Value::Null).unwrap(), Value::Int(0));
        assert!(node.deserialize(&Value::from("3")).is_err());
        assert_eq!(node.deserialize(&Value::from("30")).unwrap(), Value::Int(30));
    }

    #[test]
    fn test_missing_drop_yields_sentinel() {
        let node = SchemaNode::builder(Str::new()).missing(Missing::Drop).build();
        assert_eq!(node.deserialize(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_serialize_uses_default_for_sentinel() {
        let node = SchemaNode::builder(Boolean::new())
            .default(DefaultValue::Value(Value::Bool(true)))
            .build();
        assert_eq!(node.serialize(&Value::Null).unwrap(), Value::from("true"));
        let plain = SchemaNode::new(Boolean::new());
        assert_eq!(plain.serialize(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_closure_validator() {
        let node = SchemaNode::builder(Str::new())
            .validator(|node: &SchemaNode, value: &Value| {
                if value.as_str() == Some("forbidden") {
                    Err(Invalid::new(node, "nope"))
                } else {
                    Ok(())
                }
            })
            .build();
        assert!(node.deserialize(&Value::from("ok")).is_ok());
        let err = node.deserialize(&Value::from("forbidden")).unwrap_err();
        assert_eq!(err.msg().as_deref(), Some("nope"));
    }

    #[test]
    fn test_clone_shares_identity() {
        let a = SchemaNode::named("a", Str::new());
        let b = a.clone();
        let c = SchemaNode::named("a", Str::new());
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
