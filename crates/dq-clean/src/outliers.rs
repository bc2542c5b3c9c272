//! IQR-based outlier clipping for numeric columns.

use dq_model::{
    AuditEntry, AuditKind, AuditLog, CellValue, ColumnKind, Result, Severity, Stage, Table,
    format_numeric,
};

use crate::classify::classify_column;
use crate::pipeline::{CleaningStage, StageContext};
use crate::stats::Quartiles;

pub struct OutlierStage;

impl CleaningStage for OutlierStage {
    fn execute(&self, table: &mut Table, ctx: &StageContext, log: &mut AuditLog) -> Result<()> {
        for idx in 0..table.width() {
            let column = &table.columns()[idx];
            if classify_column(column, &ctx.dates) != ColumnKind::Numeric {
                continue;
            }
            let name = column.name.clone();
            if let Some(values) = table.values_mut(idx) {
                clip_outliers(&name, values, ctx.options.iqr_multiplier, log);
            }
        }
        Ok(())
    }

    fn stage(&self) -> Stage {
        Stage::OutlierResolver
    }
}

/// Clips values outside `[q1 - k * iqr, q3 + k * iqr]` to the nearest bound.
///
/// Columns with a zero IQR are skipped. Returns the number of clipped values.
pub fn clip_outliers(
    column: &str,
    values: &mut [CellValue],
    multiplier: f64,
    log: &mut AuditLog,
) -> usize {
    let present: Vec<f64> = values.iter().filter_map(CellValue::as_f64).collect();
    let Some(quartiles) = Quartiles::of(&present) else {
        return 0;
    };
    if quartiles.iqr() <= 0.0 {
        log.push(
            AuditEntry::new(
                Stage::OutlierResolver,
                AuditKind::OutlierSkipped,
                Severity::Info,
                format!("column '{column}' has zero interquartile range, skipping"),
            )
            .with_column(column),
        );
        return 0;
    }

    let (lower, upper) = quartiles.bounds(multiplier);
    let mut clipped = 0;
    for (row, value) in values.iter_mut().enumerate() {
        let Some(number) = value.as_f64() else {
            continue;
        };
        let bound = if number < lower {
            lower
        } else if number > upper {
            upper
        } else {
            continue;
        };
        let before = std::mem::replace(value, CellValue::Number(bound));
        log.push(
            AuditEntry::new(
                Stage::OutlierResolver,
                AuditKind::OutlierClipped,
                Severity::Info,
                format!(
                    "clipped '{column}' row {row} to {}",
                    format_numeric(bound)
                ),
            )
            .with_column(column)
            .with_row(row)
            .with_affected(1)
            .with_change(before, CellValue::Number(bound)),
        );
        clipped += 1;
    }

    log.push(
        AuditEntry::new(
            Stage::OutlierResolver,
            AuditKind::OutliersSummary,
            Severity::Debug,
            format!(
                "column '{column}' bounds [{}, {}], {clipped} values clipped",
                format_numeric(lower),
                format_numeric(upper)
            ),
        )
        .with_column(column)
        .with_affected(clipped),
    );
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<CellValue> {
        values.iter().copied().map(CellValue::Number).collect()
    }

    #[test]
    fn clips_to_upper_bound() {
        let mut values = numbers(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        let mut log = AuditLog::new();
        let clipped = clip_outliers("n", &mut values, 1.5, &mut log);
        assert_eq!(clipped, 1);
        assert_eq!(values, numbers(&[1.0, 2.0, 3.0, 4.0, 7.0]));

        let entry = log.of_kind(AuditKind::OutlierClipped).next().expect("clip entry");
        assert_eq!(entry.row, Some(4));
        let change = entry.change.as_ref().expect("change");
        assert_eq!(change.before, CellValue::Number(100.0));
        assert_eq!(change.after, CellValue::Number(7.0));
    }

    #[test]
    fn clips_low_values_and_skips_missing() {
        let mut values = vec![
            CellValue::Number(-50.0),
            CellValue::Missing,
            CellValue::text("10"),
            CellValue::Number(11.0),
            CellValue::Number(12.0),
            CellValue::Number(13.0),
        ];
        let mut log = AuditLog::new();
        assert_eq!(clip_outliers("n", &mut values, 1.5, &mut log), 1);
        assert!(values[1].is_missing());
        assert_eq!(values[2], CellValue::text("10"));
        assert_eq!(values[0], CellValue::Number(7.0));
    }

    #[test]
    fn zero_iqr_skips_column() {
        let mut values = numbers(&[5.0, 5.0, 5.0, 5.0]);
        let mut log = AuditLog::new();
        assert_eq!(clip_outliers("n", &mut values, 1.5, &mut log), 0);
        assert_eq!(values, numbers(&[5.0, 5.0, 5.0, 5.0]));
        assert_eq!(log.of_kind(AuditKind::OutlierSkipped).count(), 1);
    }
}
