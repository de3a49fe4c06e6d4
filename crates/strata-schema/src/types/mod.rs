//! # Schema Types: the Type Extension Point
//!
//! A [`SchemaType`] converts between the cstruct and appstruct of a single
//! node. Leaf types implement [`SchemaType::serialize`] and
//! [`SchemaType::deserialize`] and inherit the leaf defaults for the
//! remaining operations. Composite types additionally implement
//! [`SchemaType::cstruct_children`] and route flatten/unflatten/get/set
//! through a shared [`ChildLayout`].
//!
//! ## Null Discipline
//!
//! Every built-in type maps the null sentinel to itself in both directions,
//! with one exception: [`Mapping`] serializes the sentinel as an empty
//! mapping so that each child's default gets a chance to apply.
//!
//! ## Writing a Type
//!
//! ```
//! use strata_core::Value;
//! use strata_schema::{Invalid, SchemaNode, SchemaType};
//!
//! #[derive(Debug)]
//! struct Upper;
//!
//! impl SchemaType for Upper {
//!     fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid> {
//!         match appstruct {
//!             Value::Null => Ok(Value::Null),
//!             Value::Str(s) => Ok(Value::Str(s.to_lowercase())),
//!             other => Err(Invalid::new(node, format!("\"{other}\" is not a string"))),
//!         }
//!     }
//!
//!     fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid> {
//!         match cstruct {
//!             Value::Null => Ok(Value::Null),
//!             Value::Str(s) => Ok(Value::Str(s.to_uppercase())),
//!             other => Err(Invalid::new(node, format!("\"{other}\" is not a string"))),
//!         }
//!     }
//! }
//!
//! let node = SchemaNode::new(Upper);
//! assert_eq!(node.deserialize(&Value::from("abc")).unwrap(), Value::from("ABC"));
//! ```

use std::fmt;

use strata_core::{Flattened, StrataError, Value};

use crate::invalid::Invalid;
use crate::node::SchemaNode;

pub mod boolean;
pub mod children;
pub mod mapping;
pub mod number;
pub mod sequence;
pub mod set;
pub mod string;
pub mod temporal;
pub mod tuple;

pub use boolean::{Boolean, BooleanOptions};
pub use children::ChildLayout;
pub use mapping::{Mapping, MappingOptions, Unknown};
pub use number::{Float, Int, IntOptions};
pub use sequence::{Sequence, SequenceOptions};
pub use set::Set;
pub use string::{Str, StrOptions};
pub use temporal::{Date, DateTime, Time};
pub use tuple::Tuple;

/// Conversion strategy for one schema node.
///
/// All methods take the node first so failures can be attributed to it
/// and composite types can reach their children.
pub trait SchemaType: Send + Sync + fmt::Debug {
    /// Short name used in logs and structural errors.
    fn type_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Convert an appstruct into a cstruct.
    fn serialize(&self, node: &SchemaNode, appstruct: &Value) -> Result<Value, Invalid>;

    /// Convert a cstruct into an appstruct.
    fn deserialize(&self, node: &SchemaNode, cstruct: &Value) -> Result<Value, Invalid>;

    /// The cstruct of each child of `node`.
    ///
    /// Must never fail: malformed input yields sentinel-filled output.
    /// Leaf types have no children.
    fn cstruct_children(&self, _node: &SchemaNode, _cstruct: &Value) -> Vec<Value> {
        Vec::new()
    }

    /// Whether child failures are addressed by index.
    fn is_positional(&self) -> bool {
        false
    }

    /// Flatten `appstruct` into dotted-path keys under `prefix`.
    ///
    /// `listitem` is set when the node is the item template of a sequence;
    /// its key is then the prefix itself.
    fn flatten(
        &self,
        node: &SchemaNode,
        appstruct: &Value,
        prefix: &str,
        listitem: bool,
    ) -> Result<Flattened, StrataError> {
        let selfname = if listitem {
            prefix.to_string()
        } else {
            format!("{prefix}{}", node.name())
        };
        let mut out = Flattened::new();
        out.insert(selfname.trim_end_matches('.').to_string(), appstruct.clone());
        Ok(out)
    }

    /// Rebuild the appstruct for `node` from a flattened structure.
    fn unflatten(
        &self,
        node: &SchemaNode,
        _paths: &[String],
        fstruct: &Flattened,
    ) -> Result<Value, StrataError> {
        fstruct
            .get(node.name())
            .cloned()
            .ok_or_else(|| StrataError::MissingKey(node.name().to_string()))
    }

    /// Read the value at a dotted `path` inside `appstruct`.
    fn get_value(
        &self,
        node: &SchemaNode,
        _appstruct: &Value,
        _path: &str,
    ) -> Result<Value, StrataError> {
        Err(StrataError::NotComposite {
            node: node.name().to_string(),
            type_name: self.type_name(),
        })
    }

    /// Write `value` at a dotted `path` inside `appstruct`.
    fn set_value(
        &self,
        node: &SchemaNode,
        _appstruct: &mut Value,
        _path: &str,
        _value: Value,
    ) -> Result<(), StrataError> {
        Err(StrataError::NotComposite {
            node: node.name().to_string(),
            type_name: self.type_name(),
        })
    }
}

/// Which way a composite type is converting its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Serialize,
    Deserialize,
}

impl Direction {
    /// Run the conversion on a child node.
    pub(crate) fn apply(self, child: &SchemaNode, value: &Value) -> Result<Value, Invalid> {
        match self {
            Direction::Serialize => child.serialize(value),
            Direction::Deserialize => child.deserialize(value),
        }
    }

    /// Whether a sentinel result from `child` means "omit it".
    pub(crate) fn drops(self, child: &SchemaNode) -> bool {
        match self {
            Direction::Serialize => child.default_value().is_drop(),
            Direction::Deserialize => matches!(child.missing(), crate::node::Missing::Drop),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Direction::Serialize => "serialize",
            Direction::Deserialize => "deserialize",
        }
    }
}
