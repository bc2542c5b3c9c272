//! Append-only audit trail of every corrective action.
//!
//! Stages never log directly. They push [`AuditEntry`] values into the
//! [`AuditLog`] they are handed, and the caller decides where the entries go
//! (console, log file, JSON artifact).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Pipeline stage that emitted an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    StructuralNormalizer,
    ColumnClassifier,
    MissingValueResolver,
    OutlierResolver,
    FormatStandardizer,
    Validator,
    ReportBuilder,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuralNormalizer => "structural_normalizer",
            Self::ColumnClassifier => "column_classifier",
            Self::MissingValueResolver => "missing_value_resolver",
            Self::OutlierResolver => "outlier_resolver",
            Self::FormatStandardizer => "format_standardizer",
            Self::Validator => "validator",
            Self::ReportBuilder => "report_builder",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// What an entry records. The report builder aggregates on these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    ColumnRenamed,
    ColumnClassified,
    DuplicatesRemoved,
    ValuesImputed,
    ImputationUnresolved,
    ImputationSkipped,
    ModeTie,
    OutlierClipped,
    OutliersSummary,
    OutlierSkipped,
    DatesStandardized,
    DateParseFailure,
    TextCaseApplied,
    InvalidValue,
    ValuesValidated,
    RowCompletenessScored,
    DerivedColumnAdded,
    ReportBuilt,
}

/// Before/after pair for a single rewritten cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    pub before: CellValue,
    pub after: CellValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub stage: Stage,
    pub kind: AuditKind,
    pub severity: Severity,
    /// Human-readable description of the operation.
    pub message: String,
    pub column: Option<String>,
    pub row: Option<usize>,
    /// Number of values or rows affected.
    pub affected: usize,
    pub change: Option<ValueChange>,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(stage: Stage, kind: AuditKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            severity,
            message: message.into(),
            column: None,
            row: None,
            affected: 0,
            change: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    #[must_use]
    pub fn with_affected(mut self, affected: usize) -> Self {
        self.affected = affected;
        self
    }

    #[must_use]
    pub fn with_change(mut self, before: CellValue, after: CellValue) -> Self {
        self.change = Some(ValueChange { before, after });
        self
    }
}

/// Ordered, append-only sequence of [`AuditEntry`] values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<AuditEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn of_kind(&self, kind: AuditKind) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// Sum of `affected` over every entry of `kind`.
    pub fn total_affected(&self, kind: AuditKind) -> usize {
        self.of_kind(kind).map(|entry| entry.affected).sum()
    }

    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity >= severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_emission_order() {
        let mut log = AuditLog::new();
        log.push(
            AuditEntry::new(
                Stage::StructuralNormalizer,
                AuditKind::DuplicatesRemoved,
                Severity::Info,
                "removed duplicates",
            )
            .with_affected(2),
        );
        log.push(
            AuditEntry::new(
                Stage::MissingValueResolver,
                AuditKind::ValuesImputed,
                Severity::Info,
                "imputed",
            )
            .with_column("age")
            .with_affected(3),
        );
        log.push(
            AuditEntry::new(
                Stage::MissingValueResolver,
                AuditKind::ValuesImputed,
                Severity::Info,
                "imputed",
            )
            .with_column("city")
            .with_affected(1),
        );

        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0].kind, AuditKind::DuplicatesRemoved);
        assert_eq!(log.total_affected(AuditKind::ValuesImputed), 4);
        assert_eq!(log.total_affected(AuditKind::OutlierClipped), 0);
        assert!(log.entries()[0].timestamp <= log.entries()[2].timestamp);
    }

    #[test]
    fn severity_is_ordered() {
        let mut log = AuditLog::new();
        for severity in [Severity::Debug, Severity::Info, Severity::Warning, Severity::Error] {
            log.push(AuditEntry::new(
                Stage::Validator,
                AuditKind::InvalidValue,
                severity,
                severity.as_str(),
            ));
        }
        assert_eq!(log.count_at_least(Severity::Warning), 2);
    }
}
