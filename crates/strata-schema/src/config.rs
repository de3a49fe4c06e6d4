//! # Configuration by Name
//!
//! Builds built-in types and validators from a name and JSON options, as
//! used by the CLI. Options objects deserialize into the per-type option
//! structs; omitted fields take their defaults.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{
    Boolean, BooleanOptions, Date, DateTime, Float, Int, IntOptions, SchemaType, Set, Str,
    StrOptions, Time,
};
use crate::validators::{Email, Luhn, Regex, Url, UuidValidator, Validator};

/// Leaf type names accepted by [`build_type`].
pub const TYPE_NAMES: &[&str] = &[
    "boolean", "str", "int", "float", "datetime", "date", "time", "set",
];

/// Validator names accepted by [`build_validator`].
pub const VALIDATOR_NAMES: &[&str] = &["luhn", "email", "url", "uuid", "regex"];

/// Failure to build a type or validator from configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No built-in type has this name.
    #[error("unknown type \"{0}\" (expected one of: {names})", names = TYPE_NAMES.join(", "))]
    UnknownType(String),

    /// No built-in validator has this name.
    #[error("unknown validator \"{0}\" (expected one of: {names})", names = VALIDATOR_NAMES.join(", "))]
    UnknownValidator(String),

    /// The options object does not fit the type's option struct.
    #[error("invalid options for type \"{type_name}\": {source}")]
    Options {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The default offset is not within a day of UTC.
    #[error("offset of {0} minutes is out of range")]
    Offset(i32),

    /// The named type takes no options but some were given.
    #[error("type \"{0}\" takes no options")]
    NoOptions(String),

    /// The regex validator was requested without a pattern.
    #[error("validator \"regex\" requires a pattern")]
    MissingPattern,

    /// The pattern does not compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

fn options<T: DeserializeOwned>(
    type_name: &str,
    options: Option<&serde_json::Value>,
) -> Result<T, ConfigError> {
    let value = options.cloned().unwrap_or_else(|| serde_json::Value::Object(Default::default()));
    serde_json::from_value(value).map_err(|source| ConfigError::Options {
        type_name: type_name.to_string(),
        source,
    })
}

fn no_options(type_name: &str, options: Option<&serde_json::Value>) -> Result<(), ConfigError> {
    match options {
        None | Some(serde_json::Value::Null) => Ok(()),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(()),
        Some(_) => Err(ConfigError::NoOptions(type_name.to_string())),
    }
}

/// Build a leaf type by name.
///
/// `datetime` accepts `{"default_offset_minutes": N}`; `date`, `time`,
/// `float` and `set` take no options.
///
/// # Errors
///
/// Returns [`ConfigError`] for unknown names or options that do not fit.
pub fn build_type(
    name: &str,
    opts: Option<&serde_json::Value>,
) -> Result<Arc<dyn SchemaType>, ConfigError> {
    tracing::debug!(name, has_options = opts.is_some(), "building type");
    let typ: Arc<dyn SchemaType> = match name {
        "boolean" => Arc::new(Boolean::from_options(options::<BooleanOptions>(name, opts)?)),
        "str" => Arc::new(Str::from_options(options::<StrOptions>(name, opts)?)),
        "int" => Arc::new(Int::from_options(options::<IntOptions>(name, opts)?)),
        "datetime" => {
            let minutes = options::<DateTimeOptions>(name, opts)?.default_offset_minutes;
            let offset = minutes
                .checked_mul(60)
                .and_then(chrono::FixedOffset::east_opt)
                .ok_or(ConfigError::Offset(minutes))?;
            Arc::new(DateTime::with_default_offset(offset))
        }
        "float" => {
            no_options(name, opts)?;
            Arc::new(Float::new())
        }
        "date" => {
            no_options(name, opts)?;
            Arc::new(Date::new())
        }
        "time" => {
            no_options(name, opts)?;
            Arc::new(Time::new())
        }
        "set" => {
            no_options(name, opts)?;
            Arc::new(Set::new())
        }
        other => return Err(ConfigError::UnknownType(other.to_string())),
    };
    Ok(typ)
}

/// Options for `datetime` in [`build_type`].
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DateTimeOptions {
    default_offset_minutes: i32,
}

/// Build a validator by name. `regex` requires `pattern`; the others
/// ignore it.
///
/// # Errors
///
/// Returns [`ConfigError`] for unknown names, a missing pattern, or a
/// pattern that does not compile.
pub fn build_validator(name: &str, pattern: Option<&str>) -> Result<Arc<dyn Validator>, ConfigError> {
    tracing::debug!(name, "building validator");
    let validator: Arc<dyn Validator> = match name {
        "luhn" => Arc::new(Luhn::new()),
        "email" => Arc::new(Email::new()),
        "url" => Arc::new(Url::new()),
        "uuid" => Arc::new(UuidValidator::new()),
        "regex" => Arc::new(Regex::new(pattern.ok_or(ConfigError::MissingPattern)?)?),
        other => return Err(ConfigError::UnknownValidator(other.to_string())),
    };
    Ok(validator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SchemaNode;
    use serde_json::json;
    use strata_core::Value;

    #[test]
    fn test_every_listed_type_builds() {
        for name in TYPE_NAMES {
            let typ = build_type(name, None).unwrap();
            assert!(!typ.type_name().is_empty());
        }
    }

    #[test]
    fn test_type_with_options() {
        let opts = json!({"false_choices": ["no"], "true_val": "Y"});
        let typ = build_type("boolean", Some(&opts)).unwrap();
        let node = SchemaNode::builder_shared(typ).build();
        assert_eq!(node.deserialize(&Value::from("NO")).unwrap(), Value::Bool(false));
        assert_eq!(node.serialize(&Value::Bool(true)).unwrap(), Value::from("Y"));
    }

    #[test]
    fn test_datetime_offset_option() {
        let opts = json!({"default_offset_minutes": 90});
        let typ = build_type("datetime", Some(&opts)).unwrap();
        let node = SchemaNode::builder_shared(typ).build();
        let app = node.deserialize(&Value::from("2024-01-01T00:00:00")).unwrap();
        assert_eq!(node.serialize(&app).unwrap(), Value::from("2024-01-01T00:00:00+01:30"));

        let bad = json!({"default_offset_minutes": 100_000});
        assert!(matches!(
            build_type("datetime", Some(&bad)),
            Err(ConfigError::Offset(100_000))
        ));
    }

    #[test]
    fn test_bad_type_config() {
        assert!(matches!(build_type("decimal", None), Err(ConfigError::UnknownType(_))));
        assert!(matches!(
            build_type("int", Some(&json!({"strict": "yes"}))),
            Err(ConfigError::Options { .. })
        ));
        assert!(matches!(
            build_type("date", Some(&json!({"format": "%d"}))),
            Err(ConfigError::NoOptions(_))
        ));
        let msg = build_type("decimal", None).err().map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.starts_with("unknown type \"decimal\""));
    }

    #[test]
    fn test_build_validator() {
        for name in ["luhn", "email", "url", "uuid"] {
            assert!(build_validator(name, None).is_ok());
        }
        assert!(build_validator("regex", Some("^a+$")).is_ok());
        assert!(matches!(build_validator("regex", None), Err(ConfigError::MissingPattern)));
        assert!(matches!(build_validator("regex", Some("(")), Err(ConfigError::Pattern(_))));
        assert!(matches!(
            build_validator("palindrome", None),
            Err(ConfigError::UnknownValidator(_))
        ));
    }
}
