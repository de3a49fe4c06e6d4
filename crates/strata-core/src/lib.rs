//! # strata-core: Value Model and Null Sentinel
//!
//! This crate is the leaf of the strata workspace. It defines the dynamic
//! [`Value`] type that carries both external representations (*cstructs*)
//! and internal representations (*appstructs*) through schema nodes, the
//! [`NULL`] sentinel that marks "no value supplied", and the structural
//! error type shared by every other crate.
//!
//! ## Key Design Principles
//!
//! 1. **One sentinel.** [`NULL`] is the unit variant [`Value::Null`]. It is
//!    never equal to [`Value::None`], an empty string, zero, `false`, or an
//!    empty container, so "field was not supplied" round-trips distinctly
//!    from "field was supplied as empty".
//!
//! 2. **Immutable and shareable.** `NULL` is a `const`; comparing against it
//!    needs no synchronization.
//!
//! 3. **Structural errors are not validation errors.** [`StrataError`] covers
//!    malformed paths and shape mismatches during flatten/get/set. Validation
//!    failures live in `strata-schema` as `Invalid`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `strata-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod value;

pub use error::StrataError;
pub use value::{Flattened, Value, NULL};
