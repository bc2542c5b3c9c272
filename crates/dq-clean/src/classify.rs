//! Column classification.
//!
//! Every stage that dispatches on column type calls [`classify_column`] on the
//! column as it is at that moment. Nothing is cached on the column itself.

use chrono::{NaiveDate, NaiveDateTime};

use dq_model::{
    AuditEntry, AuditKind, AuditLog, CellValue, Column, ColumnKind, Result, Severity, Stage, Table,
};

use crate::pipeline::{CleaningStage, StageContext};

/// Parses date strings against an ordered list of `chrono` formats.
#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl DateParser {
    pub fn new(formats: &[String]) -> Self {
        Self {
            formats: formats.to_vec(),
        }
    }

    /// First format that accepts `value` wins. Datetime formats keep only the
    /// date part.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.formats.iter().find_map(|format| {
            NaiveDate::parse_from_str(trimmed, format)
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(trimmed, format)
                        .ok()
                        .map(|datetime| datetime.date())
                })
        })
    }

    /// Only text cells can hold dates.
    pub fn parse_cell(&self, value: &CellValue) -> Option<NaiveDate> {
        value.as_text().and_then(|text| self.parse(text))
    }
}

/// Numeric if every present value is a finite number, else date if every
/// present value parses as a date, else categorical.
///
/// A column with no present values is categorical.
pub fn classify_column(column: &Column, dates: &DateParser) -> ColumnKind {
    if column.present().next().is_none() {
        return ColumnKind::Categorical;
    }
    if column.present().all(|(_, value)| value.as_f64().is_some()) {
        ColumnKind::Numeric
    } else if column
        .present()
        .all(|(_, value)| dates.parse_cell(value).is_some())
    {
        ColumnKind::Date
    } else {
        ColumnKind::Categorical
    }
}

pub fn classify_table(table: &Table, dates: &DateParser) -> Vec<ColumnKind> {
    table
        .columns()
        .iter()
        .map(|column| classify_column(column, dates))
        .collect()
}

/// Records the classification of every column.
pub struct ClassifyStage;

impl CleaningStage for ClassifyStage {
    fn execute(&self, table: &mut Table, ctx: &StageContext, log: &mut AuditLog) -> Result<()> {
        let kinds = classify_table(table, &ctx.dates);
        for (column, kind) in table.columns().iter().zip(kinds) {
            let entry = if column.present_count() == 0 {
                AuditEntry::new(
                    Stage::ColumnClassifier,
                    AuditKind::ColumnClassified,
                    Severity::Info,
                    format!(
                        "column '{}' has no values, classified as {kind}",
                        column.name
                    ),
                )
            } else {
                AuditEntry::new(
                    Stage::ColumnClassifier,
                    AuditKind::ColumnClassified,
                    Severity::Debug,
                    format!("column '{}' classified as {kind}", column.name),
                )
            };
            log.push(entry.with_column(column.name.clone()));
        }
        Ok(())
    }

    fn stage(&self) -> Stage {
        Stage::ColumnClassifier
    }
}
