//! # Deserialize and Serialize Subcommands
//!
//! Binds a named built-in type to an anonymous root node and runs one
//! conversion. `deserialize` treats `--value` as raw text (the usual form
//! of a cstruct); `serialize` parses `--value` as JSON.
//!
//! JSON cannot carry dates or times, so `serialize` for a temporal type
//! first reads ISO text through the type to obtain the appstruct.

use anyhow::{Context, Result};
use clap::Args;
use strata_core::Value;
use strata_schema::{build_type, SchemaNode};

use crate::input::InputArgs;
use crate::report::Report;

const TEMPORAL_TYPES: &[&str] = &["datetime", "date", "time"];

/// Arguments shared by `deserialize` and `serialize`.
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Built-in type: boolean, str, int, float, datetime, date, time, set.
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: String,

    /// Type options as a JSON object, e.g. '{"strict": true}'.
    #[arg(long, value_name = "JSON")]
    pub options: Option<String>,

    #[command(flatten)]
    pub input: InputArgs,
}

impl ConvertArgs {
    fn node(&self) -> Result<SchemaNode> {
        let options = self
            .options
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .context("--options is not valid JSON")?;
        let typ = build_type(&self.type_name, options.as_ref())?;
        Ok(SchemaNode::builder_shared(typ).build())
    }
}

/// Deserialize the input through the named type.
///
/// # Errors
///
/// Returns an error for unknown types, bad options or unreadable input.
/// A rejected value is not an error; it is reported.
pub fn deserialize_report(args: &ConvertArgs) -> Result<Report> {
    let node = args.node()?;
    let cstruct = args.input.load(true)?;
    tracing::debug!(type_name = %args.type_name, "deserializing");
    Ok(Report::from_result(node.deserialize(&cstruct)))
}

/// Serialize the input through the named type.
///
/// # Errors
///
/// Returns an error for unknown types, bad options or unreadable input.
/// A rejected value is not an error; it is reported.
pub fn serialize_report(args: &ConvertArgs) -> Result<Report> {
    let node = args.node()?;
    let mut appstruct = args.input.load(false)?;
    if TEMPORAL_TYPES.contains(&args.type_name.as_str()) && matches!(appstruct, Value::Str(_)) {
        appstruct = match node.typ().deserialize(&node, &appstruct) {
            Ok(parsed) => parsed,
            Err(invalid) => return Ok(Report::rejected(&invalid)),
        };
    }
    tracing::debug!(type_name = %args.type_name, "serializing");
    Ok(Report::from_result(node.serialize(&appstruct)))
}

/// Run `strata deserialize` and print the report.
///
/// # Errors
///
/// See [`deserialize_report`].
pub fn run_deserialize(args: &ConvertArgs) -> Result<u8> {
    print(deserialize_report(args)?)
}

/// Run `strata serialize` and print the report.
///
/// # Errors
///
/// See [`serialize_report`].
pub fn run_serialize(args: &ConvertArgs) -> Result<u8> {
    print(serialize_report(args)?)
}

pub(crate) fn print(report: Report) -> Result<u8> {
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(type_name: &str, options: Option<&str>, value: &str) -> ConvertArgs {
        ConvertArgs {
            type_name: type_name.to_string(),
            options: options.map(str::to_string),
            input: InputArgs {
                value: Some(value.to_string()),
                input: None,
                format: None,
            },
        }
    }

    #[test]
    fn test_deserialize_int() {
        let report = deserialize_report(&args("int", None, " 42 ")).unwrap();
        assert!(report.ok);
        assert_eq!(report.value, Some(serde_json::json!(42)));
    }

    #[test]
    fn test_deserialize_empty_is_required() {
        let report = deserialize_report(&args("str", None, "")).unwrap();
        assert!(!report.ok);
        assert_eq!(report.errors[0].messages, ["Required"]);
        assert_eq!(report.errors[0].path, "");
    }

    #[test]
    fn test_deserialize_with_options() {
        let strict = deserialize_report(&args("boolean", Some(r#"{"true_choices": ["y"]}"#), "maybe")).unwrap();
        assert!(!strict.ok);
        let lenient = deserialize_report(&args("boolean", None, "maybe")).unwrap();
        assert_eq!(lenient.value, Some(serde_json::json!(true)));
    }

    #[test]
    fn test_serialize_parses_json() {
        let report = serialize_report(&args("set", None, r#"["a", "b", "a"]"#)).unwrap();
        assert_eq!(report.value, Some(serde_json::json!(["a", "b"])));
        let report = serialize_report(&args("boolean", None, "false")).unwrap();
        assert_eq!(report.value, Some(serde_json::json!("false")));
    }

    #[test]
    fn test_serialize_temporal_text() {
        let report = serialize_report(&args("date", None, r#""2024-02-29T10:00:00Z""#)).unwrap();
        assert_eq!(report.value, Some(serde_json::json!("2024-02-29")));
        let report = serialize_report(&args("date", None, r#""not a date""#)).unwrap();
        assert!(!report.ok);
    }

    #[test]
    fn test_configuration_errors() {
        assert!(deserialize_report(&args("decimal", None, "1")).is_err());
        assert!(deserialize_report(&args("int", Some("{oops"), "1")).is_err());
        assert!(deserialize_report(&args("int", Some(r#"{"strict": 1}"#), "1")).is_err());
    }
}
