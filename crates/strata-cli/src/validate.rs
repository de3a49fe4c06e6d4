//! # Validate Subcommand
//!
//! Runs one built-in validator over a text value. The value is read through
//! a text node first, so empty input is reported as `Required`.

use anyhow::Result;
use clap::Args;
use strata_core::Value;
use strata_schema::types::Str;
use strata_schema::{build_validator, SchemaNode};

use crate::convert::print;
use crate::report::Report;

/// Arguments for `strata validate`.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Built-in validator: luhn, email, url, uuid, regex.
    #[arg(long)]
    pub validator: String,

    /// Pattern for the regex validator.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Text to validate.
    #[arg(long)]
    pub value: String,
}

/// Validate the value and build the report.
///
/// # Errors
///
/// Returns an error for unknown validators or a missing or bad pattern.
pub fn validate_report(args: &ValidateArgs) -> Result<Report> {
    let validator = build_validator(&args.validator, args.pattern.as_deref())?;
    let node = SchemaNode::builder(Str::new())
        .shared_validator(validator)
        .build();
    tracing::debug!(validator = %args.validator, "validating");
    Ok(Report::from_result(node.deserialize(&Value::Str(args.value.clone()))))
}

/// Run `strata validate` and print the report.
///
/// # Errors
///
/// See [`validate_report`].
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    print(validate_report(args)?)
}
