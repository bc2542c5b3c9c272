//! Missing value imputation, dispatched on the column's current type.
//!
//! - numeric: median of the present values
//! - date: forward fill; leading gaps stay missing
//! - categorical: mode, first-seen value on ties

use dq_model::{
    AuditEntry, AuditKind, AuditLog, CellValue, ColumnKind, Result, Severity, Stage, Table,
    format_numeric,
};

use crate::classify::classify_column;
use crate::pipeline::{CleaningStage, StageContext};
use crate::stats::{median, mode};

pub struct ImputeStage;

impl CleaningStage for ImputeStage {
    fn execute(&self, table: &mut Table, ctx: &StageContext, log: &mut AuditLog) -> Result<()> {
        for idx in 0..table.width() {
            let column = &table.columns()[idx];
            if column.missing_count() == 0 {
                continue;
            }
            let kind = classify_column(column, &ctx.dates);
            let name = column.name.clone();
            if let Some(values) = table.values_mut(idx) {
                impute_values(&name, kind, values, log);
            }
        }
        Ok(())
    }

    fn stage(&self) -> Stage {
        Stage::MissingValueResolver
    }
}

/// Fills the missing cells of one column and returns how many were filled.
pub fn impute_values(
    column: &str,
    kind: ColumnKind,
    values: &mut [CellValue],
    log: &mut AuditLog,
) -> usize {
    let filled = match kind {
        ColumnKind::Numeric => impute_median(column, values, log),
        ColumnKind::Date => forward_fill(column, values, log),
        ColumnKind::Categorical => impute_mode(column, values, log),
    };
    if filled > 0 {
        log.push(
            AuditEntry::new(
                Stage::MissingValueResolver,
                AuditKind::ValuesImputed,
                Severity::Info,
                format!("filled {filled} missing values in '{column}' ({kind})"),
            )
            .with_column(column)
            .with_affected(filled),
        );
    }
    filled
}

fn impute_median(column: &str, values: &mut [CellValue], log: &mut AuditLog) -> usize {
    let present: Vec<f64> = values.iter().filter_map(CellValue::as_f64).collect();
    let Some(fill) = median(&present) else {
        log.push(skipped(column, values.len()));
        return 0;
    };
    log.push(
        AuditEntry::new(
            Stage::MissingValueResolver,
            AuditKind::ValuesImputed,
            Severity::Debug,
            format!("median of '{column}' is {}", format_numeric(fill)),
        )
        .with_column(column),
    );
    fill_missing(values, &CellValue::Number(fill))
}

fn forward_fill(column: &str, values: &mut [CellValue], log: &mut AuditLog) -> usize {
    let mut last: Option<CellValue> = None;
    let mut filled = 0;
    let mut leading = 0;
    for value in values.iter_mut() {
        if value.is_missing() {
            match &last {
                Some(previous) => {
                    *value = previous.clone();
                    filled += 1;
                }
                None => leading += 1,
            }
        } else {
            last = Some(value.clone());
        }
    }
    if leading > 0 {
        log.push(
            AuditEntry::new(
                Stage::MissingValueResolver,
                AuditKind::ImputationUnresolved,
                Severity::Warning,
                format!("{leading} leading missing values in '{column}' have no earlier date"),
            )
            .with_column(column)
            .with_affected(leading),
        );
    }
    filled
}

fn impute_mode(column: &str, values: &mut [CellValue], log: &mut AuditLog) -> usize {
    let Some(found) = mode(values.iter()) else {
        log.push(skipped(column, values.len()));
        return 0;
    };
    let fill = found.value.clone();
    if found.tied {
        log.push(
            AuditEntry::new(
                Stage::MissingValueResolver,
                AuditKind::ModeTie,
                Severity::Info,
                format!(
                    "several values of '{column}' occur {} times, using the first seen",
                    found.count
                ),
            )
            .with_column(column),
        );
    }
    fill_missing(values, &fill)
}

fn fill_missing(values: &mut [CellValue], fill: &CellValue) -> usize {
    let mut filled = 0;
    for value in values.iter_mut().filter(|value| value.is_missing()) {
        *value = fill.clone();
        filled += 1;
    }
    filled
}

fn skipped(column: &str, missing: usize) -> AuditEntry {
    AuditEntry::new(
        Stage::MissingValueResolver,
        AuditKind::ImputationSkipped,
        Severity::Warning,
        format!("column '{column}' has no values to impute from"),
    )
    .with_column(column)
    .with_affected(missing)
}
