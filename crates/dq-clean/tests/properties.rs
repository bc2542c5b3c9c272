//! Structural invariants that hold for any input table.

use dq_clean::pipeline::{CleaningStage, StageContext};
use dq_clean::{
    classify::ClassifyStage, impute::ImputeStage, normalize::NormalizeStage,
    outliers::OutlierStage, run, standardize::StandardizeStage, validate::ValidateStage,
};
use dq_model::{AuditLog, CellValue, Column, Table};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        (-20i32..20).prop_map(|n| CellValue::Number(f64::from(n))),
        prop::sample::select(vec!["a", "B", " c ", "2020-01-01", "x@y.com", "bad@"])
            .prop_map(CellValue::text),
        any::<bool>().prop_map(CellValue::Boolean),
    ]
}

fn table() -> impl Strategy<Value = Table> {
    (1usize..5, 0usize..12).prop_flat_map(|(width, height)| {
        prop::collection::vec(prop::collection::vec(cell(), height), width).prop_map(
            |columns| {
                let columns = columns
                    .into_iter()
                    .enumerate()
                    .map(|(idx, values)| Column::new(format!("Col {idx}"), values))
                    .collect();
                Table::new(columns).expect("equal column lengths")
            },
        )
    })
}

fn stages() -> Vec<Box<dyn CleaningStage>> {
    vec![
        Box::new(NormalizeStage),
        Box::new(ClassifyStage),
        Box::new(ImputeStage),
        Box::new(OutlierStage),
        Box::new(StandardizeStage),
        Box::new(ValidateStage),
    ]
}

proptest! {
    #[test]
    fn every_stage_keeps_width_and_never_adds_rows(input in table()) {
        let ctx = StageContext::default();
        let mut log = AuditLog::new();
        let mut table = input;
        for stage in stages() {
            let width = table.width();
            let height = table.height();
            stage.execute(&mut table, &ctx, &mut log).expect("stage");
            prop_assert_eq!(table.width(), width);
            prop_assert!(table.height() <= height);
        }
    }

    #[test]
    fn report_matches_cleaned_table(input in table()) {
        let width = input.width();
        let height = input.height();
        let (cleaned, audit, report) = run(input).expect("run");
        prop_assert_eq!(cleaned.width(), width);
        prop_assert_eq!(report.original_row_count, height);
        prop_assert_eq!(report.cleaned_row_count, cleaned.height());
        prop_assert_eq!(report.duplicates_removed, height - cleaned.height());
        prop_assert!(report.overall_completeness_pct <= 100.0);
        prop_assert_eq!(report.per_column_completeness_pct.len(), width);
        prop_assert!(!audit.is_empty());
    }
}
