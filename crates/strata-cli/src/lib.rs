//! # strata-cli: Command-Line Front End
//!
//! Runs the built-in schema types and validators over values supplied on
//! the command line or read from JSON/YAML files, and prints a JSON report.
//!
//! ## Subcommands
//!
//! - `strata deserialize`: cstruct to appstruct through a named type.
//! - `strata serialize`: appstruct to cstruct through a named type.
//! - `strata validate`: run a named validator over a text value.
//!
//! ```bash
//! strata deserialize --type int --value " 42 "
//! strata deserialize --type boolean --options '{"true_choices": ["y"]}' --value maybe
//! strata serialize --type set --input tags.yaml --format yaml
//! strata validate --validator luhn --value 4111111111111111
//! ```
//!
//! ## Exit Codes
//!
//! `0` when the value is accepted, `1` when it is rejected (the report lists
//! every failure), `2` for usage or configuration errors.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers return a [`report::Report`]
//!   so they can be tested without capturing stdout.
//! - Logs go to stderr; stdout carries only the report.

pub mod convert;
pub mod input;
pub mod report;
pub mod validate;
