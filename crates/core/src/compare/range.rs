//! Bounded numeric range comparison.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Digits with at most one decimal separator (dot or comma).
static NUMERIC_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*[.,]?\d*$").expect("valid regex"));

/// Whether `lower (op) value (op) upper` holds.
///
/// Each bound is checked with `<=` when inclusive and `<` when exclusive.
/// A `NaN` on any side never lies within range.
pub fn within_range(
    lower: f64,
    upper: f64,
    value: f64,
    lower_inclusive: bool,
    upper_inclusive: bool,
) -> bool {
    let above_lower = if lower_inclusive {
        lower <= value
    } else {
        lower < value
    };
    let below_upper = if upper_inclusive {
        value <= upper
    } else {
        value < upper
    };
    above_lower && below_upper
}

/// Lower and upper bounds with independent inclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub lower: f64,
    pub upper: f64,
    #[serde(default = "inclusive")]
    pub lower_inclusive: bool,
    #[serde(default = "inclusive")]
    pub upper_inclusive: bool,
}

fn inclusive() -> bool {
    true
}

impl RangeBounds {
    /// Both bounds inclusive.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            lower_inclusive: true,
            upper_inclusive: true,
        }
    }

    pub fn lower_exclusive(mut self) -> Self {
        self.lower_inclusive = false;
        self
    }

    pub fn upper_exclusive(mut self) -> Self {
        self.upper_inclusive = false;
        self
    }

    pub fn contains(&self, value: f64) -> bool {
        within_range(
            self.lower,
            self.upper,
            value,
            self.lower_inclusive,
            self.upper_inclusive,
        )
    }

    /// The inequality a value must satisfy, e.g. `0<=10.5<10`.
    pub fn expression(&self, value: &str) -> String {
        let lower_op = if self.lower_inclusive { "<=" } else { "<" };
        let upper_op = if self.upper_inclusive { "<=" } else { "<" };
        format!(
            "{}{lower_op}{value}{upper_op}{}",
            self.lower, self.upper
        )
    }
}

/// A value that looks numeric, with the text it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericValue {
    pub value: f64,
    pub text: String,
}

/// Read a form value as a number, if it is in scope for a range check.
///
/// Typed integers and floats are always in scope (except `NaN`). Text and
/// choice names are in scope only when they match the numeric-literal shape
/// and contain at least one digit; a comma separator reads as a decimal
/// point. Everything else returns `None` and is left to the field's own
/// type validation.
pub fn numeric_value(value: &FieldValue) -> Option<NumericValue> {
    match value {
        FieldValue::Integer(i) => Some(NumericValue {
            value: *i as f64,
            text: i.to_string(),
        }),
        FieldValue::Float(x) if !x.is_nan() => Some(NumericValue {
            value: *x,
            text: x.to_string(),
        }),
        FieldValue::Text(_) | FieldValue::Choice { .. } => {
            let text = value.name()?.trim();
            if !NUMERIC_LITERAL_RE.is_match(text) || !text.bytes().any(|b| b.is_ascii_digit()) {
                return None;
            }
            let parsed: f64 = text.replace(',', ".").parse().ok()?;
            Some(NumericValue {
                value: parsed,
                text: text.to_string(),
            })
        }
        _ => None,
    }
}
