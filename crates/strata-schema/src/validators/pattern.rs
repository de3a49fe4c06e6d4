//! # Pattern Validators
//!
//! Text validators backed by regular expressions, plus UUID parsing.
//! Patterns match from the start of the text; anchor the end with `$` when
//! the whole string must match. The built-in email and URL patterns are
//! compiled once and shared.

use std::sync::OnceLock;

use strata_core::Value;

use super::{interpolate, Validator};
use crate::invalid::Invalid;
use crate::node::SchemaNode;

const EMAIL_PATTERN: &str =
    r"(?i)^[A-Z0-9._%!#$&'*+/=?^`{|}~()-]+@[A-Z0-9]+(?:[.-][A-Z0-9]+)*\.[A-Z]{2,22}$";

const URL_PATTERN: &str = concat!(
    r"(?i)^[a-z][a-z0-9+.-]*://",
    r"(?:[^\s:@/]+(?::[^\s:@/]*)?@)?",
    r"(?:localhost|\d{1,3}(?:\.\d{1,3}){3}|\[[0-9a-f:.]+\]",
    r"|[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*)",
    r"(?::\d{1,5})?(?:[/?#]\S*)?$",
);

static EMAIL_REGEX: OnceLock<Result<regex::Regex, regex::Error>> = OnceLock::new();
static URL_REGEX: OnceLock<Result<regex::Regex, regex::Error>> = OnceLock::new();

fn shared(
    cell: &'static OnceLock<Result<regex::Regex, regex::Error>>,
    pattern: &str,
) -> Option<&'static regex::Regex> {
    cell.get_or_init(|| regex::Regex::new(pattern)).as_ref().ok()
}

fn text<'a>(node: &SchemaNode, value: &'a Value) -> Result<&'a str, Invalid> {
    value.as_str().ok_or_else(|| {
        Invalid::new(node, format!("{value} is not a string")).with_value(value.clone())
    })
}

fn matches_at_start(regex: &regex::Regex, text: &str) -> bool {
    regex.find(text).is_some_and(|m| m.start() == 0)
}

fn check(
    node: &SchemaNode,
    value: &Value,
    regex: Option<&regex::Regex>,
    message: &str,
) -> Result<(), Invalid> {
    let text = text(node, value)?;
    match regex {
        Some(regex) if matches_at_start(regex, text) => Ok(()),
        _ => Err(Invalid::new(node, interpolate(message, &[("val", value.to_string())]))
            .with_value(value.clone())),
    }
}

/// Accepts text matching a user-supplied pattern.
#[derive(Debug, Clone)]
pub struct Regex {
    regex: regex::Regex,
    message: String,
}

impl Regex {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the compile error for a malformed pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(regex::Regex::new(pattern)?))
    }

    /// Wrap an already-compiled expression.
    pub fn from_regex(regex: regex::Regex) -> Self {
        Self {
            regex,
            message: "String does not match expected pattern".to_string(),
        }
    }

    /// Replace the failure message. `${val}` is substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Validator for Regex {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        check(node, value, Some(&self.regex), &self.message)
    }
}

/// Accepts plausible email addresses.
#[derive(Debug, Clone)]
pub struct Email {
    message: String,
}

impl Default for Email {
    fn default() -> Self {
        Self {
            message: "Invalid email address".to_string(),
        }
    }
}

impl Email {
    /// An email validator with the default message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the failure message. `${val}` is substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for Email {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        check(node, value, shared(&EMAIL_REGEX, EMAIL_PATTERN), &self.message)
    }
}

/// Accepts absolute URLs with a scheme and host.
#[derive(Debug, Clone)]
pub struct Url {
    message: String,
}

impl Default for Url {
    fn default() -> Self {
        Self {
            message: "Must be a URL".to_string(),
        }
    }
}

impl Url {
    /// A URL validator with the default message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the failure message. `${val}` is substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for Url {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        check(node, value, shared(&URL_REGEX, URL_PATTERN), &self.message)
    }
}

/// Accepts text that parses as a UUID (hyphenated, simple, braced or URN).
#[derive(Debug, Clone)]
pub struct UuidValidator {
    message: String,
}

impl Default for UuidValidator {
    fn default() -> Self {
        Self {
            message: "Invalid UUID string".to_string(),
        }
    }
}

impl UuidValidator {
    /// A UUID validator with the default message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the failure message. `${val}` is substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for UuidValidator {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        let text = text(node, value)?;
        uuid::Uuid::parse_str(text).map(|_| ()).map_err(|_| {
            Invalid::new(node, interpolate(&self.message, &[("val", value.to_string())]))
                .with_value(value.clone())
        })
    }
}
