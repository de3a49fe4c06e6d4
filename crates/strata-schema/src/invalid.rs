//! # Invalid: Structured Validation Failure
//!
//! The single failure kind raised by types and validators. Every `Invalid`
//! names the node it is about. Composite types collect the failures of their
//! children into one parent `Invalid` through [`Invalid::add`], producing a
//! tree that mirrors the schema.
//!
//! ## Addressing
//!
//! A child failure added under a positional parent (a sequence or tuple) is
//! marked positional and is addressed by its index; otherwise it is
//! addressed by its node's name. [`Invalid::paths`] enumerates every
//! root-to-leaf chain, and [`Invalid::keyname`] yields one path segment.

use std::fmt;

use strata_core::{StrataError, Value};

use crate::node::SchemaNode;

/// A validation failure attributed to a schema node.
#[derive(Debug, Clone)]
pub struct Invalid {
    node: SchemaNode,
    messages: Vec<String>,
    value: Option<Value>,
    pos: Option<usize>,
    positional: bool,
    children: Vec<Invalid>,
}

impl Invalid {
    /// Create a failure for `node` with a single message.
    pub fn new(node: &SchemaNode, msg: impl Into<String>) -> Self {
        Self {
            messages: vec![msg.into()],
            ..Self::bare(node)
        }
    }

    /// Create a failure for `node` without a message of its own.
    ///
    /// Composite types use this as the parent under which child failures
    /// are collected.
    pub fn bare(node: &SchemaNode) -> Self {
        Self {
            node: node.clone(),
            messages: Vec::new(),
            value: None,
            pos: None,
            positional: false,
            children: Vec::new(),
        }
    }

    /// Attach the offending value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Replace the messages.
    pub fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = messages;
        self
    }

    /// The node this failure is about.
    pub fn node(&self) -> &SchemaNode {
        &self.node
    }

    /// The failure's own messages, excluding those of its children.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The messages joined with `"; "`, or `None` when there are none.
    pub fn msg(&self) -> Option<String> {
        if self.messages.is_empty() {
            None
        } else {
            Some(self.messages.join("; "))
        }
    }

    /// The value that was rejected, when recorded.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Position of this failure within its parent, when recorded.
    pub fn pos(&self) -> Option<usize> {
        self.pos
    }

    /// Whether this failure is addressed by position rather than by name.
    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// Child failures.
    pub fn children(&self) -> &[Invalid] {
        &self.children
    }

    /// Consume the failure and return its children.
    pub fn into_children(self) -> Vec<Invalid> {
        self.children
    }

    /// Add a child failure.
    ///
    /// The child becomes positional when this failure's node is bound to a
    /// positional type. `pos`, when given, records the child's index.
    pub fn add(&mut self, mut child: Invalid, pos: Option<usize>) {
        if self.node.typ().is_positional() {
            child.positional = true;
        }
        if pos.is_some() {
            child.pos = pos;
        }
        self.children.push(child);
    }

    /// Append child failures verbatim, keeping their own position data.
    pub(crate) fn extend_children(&mut self, children: impl IntoIterator<Item = Invalid>) {
        self.children.extend(children);
    }

    /// Add a failure for the child node called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::UnknownChild`] if this failure's node has no
    /// child with that name.
    pub fn set_child(&mut self, name: &str, msg: impl Into<String>) -> Result<(), StrataError> {
        let (index, child) = self
            .node
            .children()
            .iter()
            .enumerate()
            .find(|(_, c)| c.name() == name)
            .ok_or_else(|| StrataError::UnknownChild {
                node: self.node.name().to_string(),
                child: name.to_string(),
            })?;
        let exc = Invalid::new(child, msg);
        self.add(exc, Some(index));
        Ok(())
    }

    /// The path segment that addresses this failure within its parent.
    pub fn keyname(&self) -> String {
        if self.positional {
            self.pos.map(|p| p.to_string()).unwrap_or_default()
        } else {
            self.node.name().to_string()
        }
    }

    /// Every chain of failures from this one down to a failure without
    /// children.
    pub fn paths(&self) -> Vec<Vec<&Invalid>> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        self.collect_paths(&mut stack, &mut out);
        out
    }

    fn collect_paths<'a>(&'a self, stack: &mut Vec<&'a Invalid>, out: &mut Vec<Vec<&'a Invalid>>) {
        stack.push(self);
        if self.children.is_empty() {
            out.push(stack.clone());
        }
        for child in &self.children {
            child.collect_paths(stack, out);
        }
        stack.pop();
    }
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.paths().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let key: Vec<String> = path
                .iter()
                .map(|exc| exc.keyname())
                .filter(|k| !k.is_empty())
                .collect();
            let msgs: Vec<&str> = path
                .iter()
                .flat_map(|exc| exc.messages.iter().map(String::as_str))
                .collect();
            if key.is_empty() {
                write!(f, "(root): {}", msgs.join("; "))?;
            } else {
                write!(f, "{}: {}", key.join("."), msgs.join("; "))?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Invalid {}
