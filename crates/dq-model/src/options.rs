//! Configuration options for the cleaning pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};

/// Date formats accepted by the classifier and the standardizer, tried in order.
///
/// Datetime forms are accepted too; only their date part is kept.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Options controlling per-column cleaning policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// `chrono` format strings a value must match to count as a date.
    pub date_formats: Vec<String>,

    /// Format every parsed date is rewritten to.
    pub output_date_format: String,

    /// Multiplier applied to the IQR when computing outlier bounds.
    pub iqr_multiplier: f64,

    /// Canonical-name substrings that select title case for text columns.
    /// Every other text column is lowercased.
    pub title_case_hints: Vec<String>,

    /// Canonical-name substrings that mark a column as holding email addresses.
    pub email_hints: Vec<String>,

    /// Canonical-name substrings that mark a text column as holding dates even
    /// when some values fail to parse. Such columns are date-standardized and
    /// the failures are logged instead of being case-normalized.
    pub date_name_hints: Vec<String>,

    /// Append a `row_completeness` column with the per-row score.
    pub add_row_completeness: bool,

    /// Append a `<column>_valid` Boolean column for each email column.
    pub add_email_validity: bool,

    /// Decimal places kept in completeness percentages.
    pub completeness_precision: u32,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS
                .iter()
                .map(|format| (*format).to_string())
                .collect(),
            output_date_format: "%Y-%m-%d".to_string(),
            iqr_multiplier: 1.5,
            title_case_hints: ["name", "title", "category", "type"]
                .iter()
                .map(|hint| (*hint).to_string())
                .collect(),
            email_hints: vec!["email".to_string()],
            date_name_hints: ["date", "time", "day", "month", "year"]
                .iter()
                .map(|hint| (*hint).to_string())
                .collect(),
            add_row_completeness: false,
            add_email_validity: false,
            completeness_precision: 2,
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_row_completeness(mut self, enable: bool) -> Self {
        self.add_row_completeness = enable;
        self
    }

    #[must_use]
    pub fn with_email_validity(mut self, enable: bool) -> Self {
        self.add_email_validity = enable;
        self
    }

    #[must_use]
    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_completeness_precision(mut self, precision: u32) -> Self {
        self.completeness_precision = precision;
        self
    }

    /// Rejects settings no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(CleanError::InvalidIqrMultiplier {
                multiplier: self.iqr_multiplier,
            });
        }
        Ok(())
    }

    /// True when `canonical` names a column that should be title-cased.
    pub fn is_title_like(&self, canonical: &str) -> bool {
        self.title_case_hints
            .iter()
            .any(|hint| canonical.contains(hint.as_str()))
    }

    pub fn is_date_named(&self, canonical: &str) -> bool {
        self.date_name_hints
            .iter()
            .any(|hint| canonical.contains(hint.as_str()))
    }

    pub fn is_email_like(&self, canonical: &str) -> bool {
        self.email_hints
            .iter()
            .any(|hint| canonical.contains(hint.as_str()))
    }
}
