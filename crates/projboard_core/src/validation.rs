//! Declarative field validation for the project input form.
//!
//! # Responsibility
//! - Check one raw field value against a set of optional constraints.
//! - Coerce the numeric form field the same way the form always has.
//!
//! # Invariants
//! - `validate` is pure and never fails; it only answers yes/no.
//! - Unset constraints are vacuously satisfied.
//! - Length rules apply to text only; bound rules apply to numbers only.

use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// Raw value under validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) if value.is_nan() => f.write_str("NaN"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Constraint set for one form field.
///
/// Deserializable so the input rules can be supplied by board config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldRules {
    /// Pairs these rules with a value.
    pub fn check(&self, value: impl Into<FieldValue>) -> Validatable {
        Validatable {
            value: value.into(),
            rules: self.clone(),
        }
    }
}

/// A value together with the constraints it must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    pub value: FieldValue,
    pub rules: FieldRules,
}

/// Returns `true` iff every specified constraint holds for the value.
pub fn validate(input: &Validatable) -> bool {
    let rules = &input.rules;
    let mut is_valid = true;

    if rules.required {
        is_valid &= !input.value.to_string().trim().is_empty();
    }

    if let FieldValue::Text(text) = &input.value {
        let length = text.chars().count();
        if let Some(min_length) = rules.min_length {
            is_valid &= length >= min_length;
        }
        if let Some(max_length) = rules.max_length {
            is_valid &= length <= max_length;
        }
    }

    if let FieldValue::Number(number) = input.value {
        // NaN compares false against any bound and therefore fails it.
        if let Some(min) = rules.min {
            is_valid &= number >= min;
        }
        if let Some(max) = rules.max {
            is_valid &= number <= max;
        }
    }

    is_valid
}

/// Converts a raw form string into a number.
///
/// Blank input becomes `0`, unparsable input becomes `NaN`.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    // `f64::from_str` also accepts "inf"/"nan" spellings the form never did.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned `0x`/`0o`/`0b` integer literals; `Some(NaN)` for a bad body.
fn parse_radix_literal(value: &str) -> Option<f64> {
    let prefix = value.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &value[2..];
    // `from_str_radix` tolerates a leading sign the form rejects.
    if digits.starts_with(|c: char| c == '+' || c == '-') {
        return Some(f64::NAN);
    }
    Some(
        u64::from_str_radix(digits, radix)
            .map(|number| number as f64)
            .unwrap_or(f64::NAN),
    )
}
