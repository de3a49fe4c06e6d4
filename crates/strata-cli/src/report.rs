//! # JSON Reports
//!
//! Every subcommand prints one [`Report`]. A rejected value lists one
//! [`Failure`] per root-to-leaf chain of the `Invalid` tree.

use serde::Serialize;
use strata_core::Value;
use strata_schema::Invalid;

/// One failure chain: dotted path and the messages collected along it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Dotted path to the failing node; empty for the root.
    pub path: String,
    /// Messages from every failure on the chain, outermost first.
    pub messages: Vec<String>,
}

/// Outcome of a subcommand.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Report {
    /// Whether the value was accepted.
    pub ok: bool,
    /// The converted value, when accepted and not the sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Failures, when rejected.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Failure>,
}

impl Report {
    /// An accepted value. The sentinel is reported without a value.
    pub fn accepted(value: &Value) -> Self {
        Self {
            ok: true,
            value: (!value.is_null()).then(|| value.to_json()),
            errors: Vec::new(),
        }
    }

    /// A rejected value.
    pub fn rejected(invalid: &Invalid) -> Self {
        let errors = invalid
            .paths()
            .into_iter()
            .map(|chain| Failure {
                path: chain
                    .iter()
                    .map(|exc| exc.keyname())
                    .filter(|k| !k.is_empty())
                    .collect::<Vec<_>>()
                    .join("."),
                messages: chain.iter().flat_map(|exc| exc.messages().iter().cloned()).collect(),
            })
            .collect();
        Self {
            ok: false,
            value: None,
            errors,
        }
    }

    /// Build from a conversion result.
    pub fn from_result(result: Result<Value, Invalid>) -> Self {
        match result {
            Ok(value) => Self::accepted(&value),
            Err(invalid) => Self::rejected(&invalid),
        }
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> u8 {
        if self.ok {
            0
        } else {
            1
        }
    }
}
