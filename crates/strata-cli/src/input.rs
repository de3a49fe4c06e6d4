//! # Input Sources
//!
//! Values come either inline (`--value`) or from a file (`--input`) in JSON
//! or YAML. JSON/YAML `null` becomes `Value::None`, never the sentinel.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use strata_core::Value;

/// Encoding of an `--input` file.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// JSON document.
    #[default]
    Json,
    /// YAML document.
    Yaml,
}

impl InputFormat {
    /// Guess the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => InputFormat::Yaml,
            _ => InputFormat::Json,
        }
    }
}

/// Where the value comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Inline value.
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    pub value: Option<String>,

    /// Read the value from a file.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Encoding of `--input`. Guessed from the extension when omitted.
    #[arg(long, value_enum, requires = "input")]
    pub format: Option<InputFormat>,
}

/// Parse a document in the given format.
///
/// # Errors
///
/// Returns an error if the text is not valid in that format.
pub fn parse_document(text: &str, format: InputFormat) -> Result<Value> {
    let json: serde_json::Value = match format {
        InputFormat::Json => serde_json::from_str(text).context("input is not valid JSON")?,
        InputFormat::Yaml => serde_yaml::from_str(text).context("input is not valid YAML")?,
    };
    Ok(Value::from_json(json))
}

impl InputArgs {
    /// Load the value.
    ///
    /// Inline text is taken verbatim when `inline_is_text` is set and parsed
    /// as JSON otherwise. Files are always parsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self, inline_is_text: bool) -> Result<Value> {
        match (&self.value, &self.input) {
            (Some(text), _) if inline_is_text => Ok(Value::Str(text.clone())),
            (Some(text), _) => parse_document(text, InputFormat::Json),
            (None, Some(path)) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let format = self.format.unwrap_or_else(|| InputFormat::from_path(path));
                tracing::debug!(path = %path.display(), ?format, "loaded input file");
                parse_document(&text, format)
            }
            (None, None) => bail!("one of --value or --input is required"),
        }
    }
}
