//! # strata-schema: Schema Nodes, Types and Validators
//!
//! A schema is a tree of [`SchemaNode`]s. Each node binds a [`SchemaType`]
//! (how to convert between the external *cstruct* and the internal
//! *appstruct*) and any number of [`Validator`]s (what an appstruct must
//! satisfy). Failures of either kind surface as a single [`Invalid`] tree
//! that mirrors the schema.
//!
//! ## Extension Points
//!
//! - [`SchemaType`]: implement `serialize` and `deserialize` for a leaf
//!   type; composite types also override `cstruct_children` and delegate
//!   flatten/unflatten/get/set to a [`types::ChildLayout`].
//! - [`Validator`]: implement `validate`, or pass a closure.
//!
//! ## Built-ins
//!
//! - Leaf types: [`types::Boolean`], [`types::Str`], [`types::Int`],
//!   [`types::Float`], [`types::DateTime`], [`types::Date`],
//!   [`types::Time`], [`types::Set`].
//! - Composite types: [`types::Mapping`], [`types::Sequence`],
//!   [`types::Tuple`].
//! - Validators: [`validators::Luhn`], [`validators::Range`],
//!   [`validators::Length`], [`validators::OneOf`],
//!   [`validators::NoneOf`], [`validators::ContainsOnly`],
//!   [`validators::Regex`], [`validators::Email`], [`validators::Url`],
//!   [`validators::UuidValidator`], [`validators::Function`],
//!   [`validators::All`], [`validators::Any`].
//!
//! ## Example
//!
//! ```
//! use strata_core::Value;
//! use strata_schema::types::{Int, Mapping, Str};
//! use strata_schema::validators::Range;
//! use strata_schema::SchemaNode;
//!
//! let person = SchemaNode::builder(Mapping::new())
//!     .name("person")
//!     .child(SchemaNode::named("name", Str::new()))
//!     .child(
//!         SchemaNode::builder(Int::new())
//!             .name("age")
//!             .validator(Range::new(Some(Value::Int(0)), None))
//!             .build(),
//!     )
//!     .build();
//!
//! let cstruct = Value::map([("name", Value::from("Ada")), ("age", Value::from("-1"))]);
//! let err = person.deserialize(&cstruct).unwrap_err();
//! assert_eq!(err.to_string(), "person.age: -1 is less than minimum value 0");
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `strata-core` internally.
//! - Types and validators never panic on malformed input; they fail with
//!   [`Invalid`].

pub mod config;
pub mod invalid;
pub mod node;
pub mod types;
pub mod validators;

pub use config::{build_type, build_validator, ConfigError};
pub use invalid::Invalid;
pub use node::{DefaultValue, Missing, NodeBuilder, SchemaNode};
pub use types::SchemaType;
pub use validators::Validator;
