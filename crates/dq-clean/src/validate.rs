//! Email validation and row completeness scoring.
//!
//! Nothing here rewrites existing cells. Derived columns are only appended when
//! [`CleaningOptions`](dq_model::CleaningOptions) asks for them.

use std::sync::LazyLock;

use regex::Regex;

use dq_model::{
    AuditEntry, AuditKind, AuditLog, CellValue, Column, Result, Severity, Stage, Table, round_to,
};

use crate::pipeline::{CleaningStage, StageContext};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Name of the derived per-row score column.
pub const ROW_COMPLETENESS_COLUMN: &str = "row_completeness";

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Validity of every cell in an email column. Missing cells stay `None`.
pub fn check_emails(column: &Column, log: &mut AuditLog) -> Vec<Option<bool>> {
    let mut checked = 0;
    let mut invalid = 0;
    let validity: Vec<Option<bool>> = column
        .values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            let text = value.to_text()?;
            checked += 1;
            let valid = is_valid_email(&text);
            if !valid {
                invalid += 1;
                log.push(
                    AuditEntry::new(
                        Stage::Validator,
                        AuditKind::InvalidValue,
                        Severity::Warning,
                        format!("invalid email in '{}' row {row}", column.name),
                    )
                    .with_column(column.name.clone())
                    .with_row(row)
                    .with_affected(1),
                );
            }
            Some(valid)
        })
        .collect();
    log.push(
        AuditEntry::new(
            Stage::Validator,
            AuditKind::ValuesValidated,
            Severity::Info,
            format!(
                "checked {checked} emails in '{}', {invalid} invalid",
                column.name
            ),
        )
        .with_column(column.name.clone())
        .with_affected(checked),
    );
    validity
}

/// Fraction of non-missing cells in each row, in `[0, 1]`.
pub fn row_completeness(table: &Table) -> Vec<f64> {
    let width = table.width();
    table
        .rows()
        .map(|row| {
            if width == 0 {
                1.0
            } else {
                row.iter().filter(|value| !value.is_missing()).count() as f64 / width as f64
            }
        })
        .collect()
}

pub struct ValidateStage;

impl CleaningStage for ValidateStage {
    fn execute(&self, table: &mut Table, ctx: &StageContext, log: &mut AuditLog) -> Result<()> {
        let mut derived = Vec::new();
        for column in table.columns() {
            if !ctx.options.is_email_like(&column.name) || is_derived(table, &column.name) {
                continue;
            }
            let validity = check_emails(column, log);
            if ctx.options.add_email_validity {
                derived.push(Column::new(
                    format!("{}_valid", column.name),
                    validity.into_iter().map(CellValue::from).collect(),
                ));
            }
        }

        let scores = row_completeness(table);
        let incomplete = scores.iter().filter(|score| **score < 1.0).count();
        let mean = if scores.is_empty() {
            1.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };
        log.push(
            AuditEntry::new(
                Stage::Validator,
                AuditKind::RowCompletenessScored,
                Severity::Info,
                format!(
                    "mean row completeness {:.2}%, {incomplete} incomplete rows",
                    mean * 100.0
                ),
            )
            .with_affected(incomplete),
        );
        if ctx.options.add_row_completeness {
            derived.push(Column::new(
                ROW_COMPLETENESS_COLUMN,
                scores
                    .into_iter()
                    .map(|score| CellValue::Number(round_to(score, 4)))
                    .collect(),
            ));
        }

        for column in derived {
            upsert_column(table, column, log)?;
        }
        Ok(())
    }

    fn stage(&self) -> Stage {
        Stage::Validator
    }
}

/// True for columns this stage writes itself.
fn is_derived(table: &Table, name: &str) -> bool {
    name == ROW_COMPLETENESS_COLUMN
        || name
            .strip_suffix("_valid")
            .is_some_and(|base| table.column(base).is_some())
}

/// Appends `column`, or overwrites the values of an existing column with the
/// same name so that re-running over cleaned output does not fail.
fn upsert_column(table: &mut Table, column: Column, log: &mut AuditLog) -> Result<()> {
    let name = column.name.clone();
    match table.column_index(&name) {
        Some(idx) => {
            if let Some(values) = table.values_mut(idx) {
                for (slot, value) in values.iter_mut().zip(column.values) {
                    *slot = value;
                }
            }
        }
        None => table.push_column(column)?,
    }
    log.push(
        AuditEntry::new(
            Stage::Validator,
            AuditKind::DerivedColumnAdded,
            Severity::Info,
            format!("wrote derived column '{name}'"),
        )
        .with_column(name),
    );
    Ok(())
}
