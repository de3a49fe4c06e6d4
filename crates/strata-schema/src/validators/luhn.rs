//! # Luhn Checksum
//!
//! Validates card-style numbers with the mod-10 Luhn algorithm: starting
//! from the rightmost digit, every second digit is doubled (subtracting 9
//! when the result exceeds 9) and the total must be divisible by 10.

use strata_core::Value;

use super::{interpolate, Validator};
use crate::invalid::Invalid;
use crate::node::SchemaNode;

const DEFAULT_MESSAGE: &str = "\"${val}\" is not a valid credit card number";

/// The Luhn digit sum of `number`, or `None` if it is empty or contains
/// anything other than ASCII digits.
pub fn luhn_checksum(number: &str) -> Option<u32> {
    if number.is_empty() {
        return None;
    }
    let mut sum = 0;
    for (i, c) in number.chars().rev().enumerate() {
        let mut digit = c.to_digit(10)?;
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    Some(sum)
}

/// Accepts digit strings (or non-negative integers) that pass the Luhn check.
#[derive(Debug, Clone)]
pub struct Luhn {
    message: String,
}

impl Default for Luhn {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Luhn {
    /// A Luhn validator with the default message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the failure message. `${val}` is substituted.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for Luhn {
    fn validate(&self, node: &SchemaNode, value: &Value) -> Result<(), Invalid> {
        let digits = match value {
            Value::Str(s) => s.clone(),
            Value::Int(i) if *i >= 0 => i.to_string(),
            _ => String::new(),
        };
        match luhn_checksum(&digits) {
            Some(sum) if sum % 10 == 0 => Ok(()),
            _ => Err(Invalid::new(
                node,
                interpolate(&self.message, &[("val", value.to_string())]),
            )
            .with_value(value.clone())),
        }
    }
}
