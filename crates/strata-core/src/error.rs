//! # Error Types: Structural Failures
//!
//! Errors raised when a caller addresses a schema or an appstruct in a way
//! that does not fit its shape: unknown dotted paths, positional access into
//! a mapping, flattened structures with missing keys. These are programming
//! or input-shape errors, distinct from validation failures which are
//! reported through `strata_schema::Invalid`.

use thiserror::Error;

/// Top-level structural error for strata.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrataError {
    /// A dotted path named a child the node does not have.
    #[error("node '{node}' has no child named '{child}'")]
    UnknownChild {
        /// Name of the node that was addressed.
        node: String,
        /// The child name that could not be resolved.
        child: String,
    },

    /// A path segment addressed into a leaf type.
    #[error("node '{node}' of type {type_name} has no addressable children")]
    NotComposite {
        /// Name of the leaf node.
        node: String,
        /// Type name bound to the node.
        type_name: &'static str,
    },

    /// A positional path segment was not a valid index.
    #[error("invalid index '{segment}' for node '{node}'")]
    BadIndex {
        /// Name of the positional node.
        node: String,
        /// The offending path segment.
        segment: String,
    },

    /// A flattened key did not start with the expected node prefix.
    #[error("flattened path '{path}' does not belong under '{prefix}'")]
    BadPath {
        /// The flattened key.
        path: String,
        /// The prefix it was expected to carry.
        prefix: String,
    },

    /// A flattened structure lacked a key required to rebuild the appstruct.
    #[error("flattened structure is missing '{0}'")]
    MissingKey(String),

    /// The appstruct handed to a composite operation had the wrong shape.
    #[error("node '{node}' expected {expected}, got {actual}")]
    Shape {
        /// Name of the node being traversed.
        node: String,
        /// Expected value kind.
        expected: &'static str,
        /// Actual value kind.
        actual: &'static str,
    },
}
