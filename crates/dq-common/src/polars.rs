//! Polars `AnyValue` utility functions.
//!
//! Conversions from Polars cells into [`CellValue`], with configurable tokens
//! that count as missing.

use polars::prelude::AnyValue;

use dq_model::{CellValue, format_numeric, parse_f64};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use dq_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(2.50)), "2.5");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// True when `value` (trimmed) is one of the configured missing tokens.
pub fn is_missing_token(value: &str, tokens: &[String]) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || tokens.iter().any(|token| token == trimmed)
}

/// Converts a Polars cell into a [`CellValue`].
///
/// Nulls, NaN floats, and strings matching `missing_tokens` become
/// [`CellValue::Missing`]. Strings are trimmed; numeric dtypes stay numbers.
pub fn any_to_cell(value: AnyValue<'_>, missing_tokens: &[String]) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Boolean(b) => CellValue::Boolean(b),
        AnyValue::String(s) => text_cell(s, missing_tokens),
        AnyValue::StringOwned(ref s) => text_cell(s.as_str(), missing_tokens),
        other => match any_to_f64(other.clone()) {
            Some(number) => CellValue::from(number),
            None => text_cell(&any_to_string(other), missing_tokens),
        },
    }
}

fn text_cell(value: &str, missing_tokens: &[String]) -> CellValue {
    if is_missing_token(value, missing_tokens) {
        CellValue::Missing
    } else {
        CellValue::text(value.trim())
    }
}
