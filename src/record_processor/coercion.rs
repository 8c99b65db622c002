//! Best-effort numeric coercion for scraped result fields
//!
//! Scraped sheets carry numbers as strings, numbers, blanks or garbage. The
//! helpers here parse what they can and fall back to a default otherwise,
//! reporting the fallback through [`Coerced::coerced`] instead of failing.

use crate::constants::AVERAGE_DECIMAL_PLACES;
use serde_json::Value;

/// A parsed value and whether the default had to be substituted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coerced<T> {
    pub value: T,
    pub coerced: bool,
}

impl<T> Coerced<T> {
    fn parsed(value: T) -> Self {
        Self {
            value,
            coerced: false,
        }
    }

    fn defaulted(value: T) -> Self {
        Self {
            value,
            coerced: true,
        }
    }
}

/// Parse a finite float from a JSON number or a numeric string
pub fn parse_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Parse an integer from a JSON number or a numeric string
///
/// Fractional values are truncated toward zero.
pub fn parse_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|v| v.trunc() as i64)
            })
        }
        _ => None,
    }
}

/// Coerce an optional field to a float, defaulting to 0
pub fn coerce_f64(value: Option<&Value>) -> Coerced<f64> {
    match value.and_then(parse_f64) {
        Some(v) => Coerced::parsed(v),
        None => Coerced::defaulted(0.0),
    }
}

/// Coerce an optional field to an integer, defaulting to 0
pub fn coerce_i64(value: Option<&Value>) -> Coerced<i64> {
    match value.and_then(parse_i64) {
        Some(v) => Coerced::parsed(v),
        None => Coerced::defaulted(0),
    }
}

/// Round to the configured number of decimal places
///
/// Rounds the exact binary value, with exact ties going to the even digit
/// (`95.125` becomes `95.12`, `2.675` becomes `2.67`).
pub fn round_average(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", AVERAGE_DECIMAL_PLACES, value)
        .parse()
        .unwrap_or(value)
}

/// Render a float the way the result sheets expect (`76.0`, `95.25`)
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Keep only the ASCII digits of a text
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}
