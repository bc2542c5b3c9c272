//! Cell values and the numeric helpers shared by every stage.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single cell in a [`crate::Table`].
///
/// `Missing` is the distinguished absence marker. It is never equal to an empty
/// string, zero, or `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    #[default]
    Missing,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric view of the cell.
    ///
    /// Numbers and text that parses as a finite number succeed. Booleans are
    /// never numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Text(text) => parse_f64(text),
            Self::Number(_) | Self::Missing | Self::Boolean(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// String form used when a value has to be treated as text.
    ///
    /// Returns `None` for missing cells so callers can skip them.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Number(value) => Some(format_numeric(*value)),
            Self::Text(text) => Some(text.clone()),
            Self::Boolean(value) => Some(value.to_string()),
        }
    }

    fn number_bits(value: f64) -> u64 {
        // -0.0 and 0.0 compare equal, so they must hash alike.
        if value == 0.0 {
            0.0f64.to_bits()
        } else {
            value.to_bits()
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Missing, Self::Missing) => true,
            (Self::Number(a), Self::Number(b)) => Self::number_bits(*a) == Self::number_bits(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Missing => {}
            Self::Number(value) => Self::number_bits(*value).hash(state),
            Self::Text(text) => text.hash(state),
            Self::Boolean(value) => value.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Number(value) => f.write_str(&format_numeric(*value)),
            Self::Text(text) => f.write_str(text),
            Self::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Number(value)
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// # Examples
///
/// ```
/// use dq_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(100.0), "100");
/// ```
pub fn format_numeric(value: f64) -> String {
    let formatted = format!("{value}");
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses a string as a finite `f64`, returning `None` for empty, invalid, or
/// non-finite input (`NaN`, `inf`).
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}
