use std::collections::BTreeMap;

use dq_model::{
    AuditKind, AuditLog, CleaningOptions, QualityReport, Table, TableSnapshot, completeness_pct,
};

/// Aggregates the pre-clean snapshot, the cleaned table, and the audit trail.
pub fn build_report(
    before: &TableSnapshot,
    table: &Table,
    log: &AuditLog,
    options: &CleaningOptions,
) -> QualityReport {
    let precision = options.completeness_precision;
    let height = table.height();
    let per_column_completeness_pct: BTreeMap<String, f64> = table
        .columns()
        .iter()
        .map(|column| {
            (
                column.name.clone(),
                completeness_pct(column.present_count(), height, precision),
            )
        })
        .collect();
    let total = table.total_cells();

    QualityReport {
        original_row_count: before.row_count,
        cleaned_row_count: height,
        duplicates_removed: log.total_affected(AuditKind::DuplicatesRemoved),
        columns_processed: table.width(),
        original_completeness_pct: before.completeness_pct(precision),
        overall_completeness_pct: completeness_pct(
            total - table.missing_cells(),
            total,
            precision,
        ),
        per_column_completeness_pct,
        values_imputed: log.total_affected(AuditKind::ValuesImputed),
        outliers_clipped: log.total_affected(AuditKind::OutlierClipped),
        invalid_values_flagged: log.total_affected(AuditKind::InvalidValue),
        date_standardization_failures: log.total_affected(AuditKind::DateParseFailure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{AuditEntry, CellValue, Column, Severity, Stage};

    #[test]
    fn aggregates_counts_from_the_log() {
        let table = Table::new(vec![
            Column::new("a", vec![CellValue::Number(1.0), CellValue::Missing]),
            Column::new("b", vec![CellValue::text("x"), CellValue::text("y")]),
        ])
        .expect("table");
        let before = TableSnapshot {
            row_count: 3,
            column_count: 2,
            missing_cells: 3,
        };
        let mut log = AuditLog::new();
        log.push(
            AuditEntry::new(
                Stage::StructuralNormalizer,
                AuditKind::DuplicatesRemoved,
                Severity::Info,
                "removed 1 duplicate rows",
            )
            .with_affected(1),
        );
        log.push(
            AuditEntry::new(
                Stage::Validator,
                AuditKind::InvalidValue,
                Severity::Warning,
                "invalid email",
            )
            .with_affected(1),
        );

        let report = build_report(&before, &table, &log, &CleaningOptions::default());
        assert_eq!(report.original_row_count, 3);
        assert_eq!(report.cleaned_row_count, 2);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.columns_processed, 2);
        assert_eq!(report.original_completeness_pct, 50.0);
        assert_eq!(report.overall_completeness_pct, 75.0);
        assert_eq!(report.per_column_completeness_pct["a"], 50.0);
        assert_eq!(report.per_column_completeness_pct["b"], 100.0);
        assert_eq!(report.invalid_values_flagged, 1);
        assert_eq!(report.values_imputed, 0);
    }
}
