//! Tests for the cleaning pipeline and its end-to-end behavior.

use dq_clean::normalize::normalize_column_names;
use dq_clean::{CleaningStage, StageContext, build_default_pipeline, run, run_with_options};
use dq_model::{
    AuditKind, AuditLog, CellValue, CleanError, CleaningOptions, Column, Severity, Stage, Table,
};

fn numbers(values: &[f64]) -> Vec<CellValue> {
    values.iter().copied().map(CellValue::Number).collect()
}

fn ids(count: usize) -> Column {
    Column::new(
        "id",
        (1..=count).map(|id| CellValue::Number(id as f64)).collect(),
    )
}

fn values_of<'a>(table: &'a Table, name: &str) -> &'a [CellValue] {
    &table.column(name).expect("column").values
}

// ============================================================================
// Pipeline composition
// ============================================================================

#[test]
fn default_pipeline_has_standard_stages() {
    let pipeline = build_default_pipeline();
    assert_eq!(
        pipeline.stage_names(),
        vec![
            "structural_normalizer",
            "column_classifier",
            "missing_value_resolver",
            "outlier_resolver",
            "format_standardizer",
            "validator",
        ]
    );
}

#[test]
fn custom_stages_run_after_defaults() {
    struct MarkStage;
    impl CleaningStage for MarkStage {
        fn execute(
            &self,
            table: &mut Table,
            _ctx: &StageContext,
            _log: &mut AuditLog,
        ) -> dq_model::Result<()> {
            if let Some(values) = table.values_mut(0) {
                values[0] = CellValue::text("marked");
            }
            Ok(())
        }
        fn stage(&self) -> Stage {
            Stage::Validator
        }
    }

    struct SkippedStage;
    impl CleaningStage for SkippedStage {
        fn execute(
            &self,
            _table: &mut Table,
            _ctx: &StageContext,
            _log: &mut AuditLog,
        ) -> dq_model::Result<()> {
            Err(CleanError::EmptyTable)
        }
        fn stage(&self) -> Stage {
            Stage::Validator
        }
        fn should_skip(&self, _table: &Table, _ctx: &StageContext) -> bool {
            true
        }
    }

    let table = Table::new(vec![Column::new("label", vec![CellValue::text("A")])]).expect("table");
    let outcome = build_default_pipeline()
        .add_stage(Box::new(SkippedStage))
        .add_stage(Box::new(MarkStage))
        .run(table, &CleaningOptions::default())
        .expect("run");
    assert_eq!(values_of(&outcome.table, "label"), &[CellValue::text("marked")]);
}

#[test]
fn empty_table_is_fatal() {
    let result = run(Table::default());
    assert_eq!(result.err(), Some(CleanError::EmptyTable));
}

// ============================================================================
// Structural normalization
// ============================================================================

#[test]
fn duplicate_rows_are_removed_in_order() {
    let table = Table::new(vec![Column::new(
        "row",
        vec![
            CellValue::text("a"),
            CellValue::text("a"),
            CellValue::text("b"),
            CellValue::text("a"),
        ],
    )])
    .expect("table");
    let (cleaned, _, report) = run(table).expect("run");
    assert_eq!(
        values_of(&cleaned, "row"),
        &[CellValue::text("a"), CellValue::text("b")]
    );
    assert_eq!(report.duplicates_removed, 2);
    assert_eq!(report.original_row_count, 4);
    assert_eq!(report.cleaned_row_count, 2);
}

#[test]
fn colliding_names_are_fatal_and_leave_table_unmodified() {
    let mut table = Table::new(vec![
        Column::new("First Name", vec![CellValue::text("Ann")]),
        Column::new("first_name", vec![CellValue::text("Bo")]),
    ])
    .expect("table");
    let before = table.clone();
    let mut log = AuditLog::new();

    let err = normalize_column_names(&mut table, &mut log).expect_err("collision");
    assert_eq!(
        err,
        CleanError::ColumnNameCollision {
            canonical: "first_name".to_string(),
            first: "First Name".to_string(),
            second: "first_name".to_string(),
        }
    );
    assert_eq!(table, before);
    assert!(log.is_empty());

    assert!(matches!(
        run(table),
        Err(CleanError::ColumnNameCollision { .. })
    ));
}

// ============================================================================
// Missing values
// ============================================================================

#[test]
fn imputes_by_column_type() {
    let table = Table::new(vec![
        ids(4),
        Column::new(
            "amount",
            vec![
                CellValue::Number(1.0),
                CellValue::Missing,
                CellValue::Number(3.0),
                CellValue::Number(2.0),
            ],
        ),
        Column::new(
            "label",
            vec![
                CellValue::text("x"),
                CellValue::Missing,
                CellValue::text("x"),
                CellValue::text("y"),
            ],
        ),
        Column::new(
            "seen",
            vec![
                CellValue::Missing,
                CellValue::text("2020-01-01"),
                CellValue::Missing,
                CellValue::text("2020-01-03"),
            ],
        ),
    ])
    .expect("table");

    let (cleaned, audit, report) = run(table).expect("run");
    assert_eq!(values_of(&cleaned, "amount"), numbers(&[1.0, 2.0, 3.0, 2.0]).as_slice());
    assert_eq!(
        values_of(&cleaned, "label"),
        &[
            CellValue::text("x"),
            CellValue::text("x"),
            CellValue::text("x"),
            CellValue::text("y"),
        ]
    );
    assert_eq!(
        values_of(&cleaned, "seen"),
        &[
            CellValue::Missing,
            CellValue::text("2020-01-01"),
            CellValue::text("2020-01-01"),
            CellValue::text("2020-01-03"),
        ]
    );
    assert_eq!(report.values_imputed, 3);
    assert!(audit.iter().any(|entry| {
        entry.kind == AuditKind::ImputationUnresolved && entry.column.as_deref() == Some("seen")
    }));
}

// ============================================================================
// Outliers
// ============================================================================

#[test]
fn clips_outlier_to_upper_bound() {
    let table = Table::new(vec![Column::new(
        "value",
        numbers(&[1.0, 2.0, 3.0, 4.0, 100.0]),
    )])
    .expect("table");
    let (cleaned, audit, report) = run(table).expect("run");
    assert_eq!(
        values_of(&cleaned, "value"),
        numbers(&[1.0, 2.0, 3.0, 4.0, 7.0]).as_slice()
    );
    assert_eq!(report.outliers_clipped, 1);
    let clip = audit
        .iter()
        .find(|entry| entry.kind == AuditKind::OutlierClipped)
        .expect("clip entry");
    assert_eq!(clip.row, Some(4));
}

#[test]
fn constant_column_skips_clipping() {
    let table = Table::new(vec![
        ids(4),
        Column::new("constant", numbers(&[5.0, 5.0, 5.0, 5.0])),
    ])
    .expect("table");
    let (cleaned, audit, report) = run(table).expect("run");
    assert_eq!(
        values_of(&cleaned, "constant"),
        numbers(&[5.0, 5.0, 5.0, 5.0]).as_slice()
    );
    assert_eq!(report.outliers_clipped, 0);
    let skip = audit
        .iter()
        .find(|entry| entry.kind == AuditKind::OutlierSkipped)
        .expect("skip entry");
    assert_eq!(skip.column.as_deref(), Some("constant"));
    assert_eq!(skip.severity, Severity::Info);
}

#[test]
fn huge_amounts_stay_numeric() {
    let table = Table::new(vec![Column::new(
        "amount",
        vec![
            CellValue::Number(1e308),
            CellValue::Missing,
            CellValue::Number(1.5e308),
        ],
    )])
    .expect("table");

    let (cleaned, audit, report) = run(table).expect("run");
    let amounts = values_of(&cleaned, "amount");
    assert!(
        amounts
            .iter()
            .all(|value| matches!(value, CellValue::Number(n) if n.is_finite()))
    );
    assert_eq!(amounts[0], CellValue::Number(1e308));
    let CellValue::Number(imputed) = amounts[1] else {
        panic!("imputed amount is not a number");
    };
    assert!((imputed / 1.25e308 - 1.0).abs() < 1e-12);
    assert_eq!(report.values_imputed, 1);
    assert!(
        !audit
            .iter()
            .any(|entry| entry.kind == AuditKind::TextCaseApplied)
    );
}

#[test]
fn invalid_iqr_multiplier_is_fatal() {
    for multiplier in [-1.5, f64::NAN, f64::INFINITY] {
        let table = Table::new(vec![Column::new("x", numbers(&[1.0, 2.0, 3.0]))]).expect("table");
        let options = CleaningOptions::default().with_iqr_multiplier(multiplier);
        let err = run_with_options(table, &options).expect_err("invalid multiplier");
        assert!(matches!(err, CleanError::InvalidIqrMultiplier { .. }));
    }
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn completeness_before_and_after() {
    let table = Table::new(vec![
        Column::new(
            "score",
            vec![
                CellValue::Number(10.0),
                CellValue::Missing,
                CellValue::Number(12.0),
                CellValue::Number(14.0),
            ],
        ),
        Column::new(
            "city",
            vec![
                CellValue::text("oslo"),
                CellValue::text("bergen"),
                CellValue::Missing,
                CellValue::text("oslo"),
            ],
        ),
    ])
    .expect("table");
    let (_, _, report) = run(table).expect("run");
    assert_eq!(report.original_completeness_pct, 75.0);
    assert_eq!(report.overall_completeness_pct, 100.0);
    assert_eq!(report.per_column_completeness_pct["score"], 100.0);
    assert_eq!(report.per_column_completeness_pct["city"], 100.0);
    assert_eq!(report.columns_processed, 2);
    assert_eq!(report.values_imputed, 2);
}

// ============================================================================
// Full run
// ============================================================================

fn customers() -> Table {
    let headers = ["Full Name", "Age", "Signup Date", "City", "Email"]
        .iter()
        .map(|header| (*header).to_string())
        .collect();
    let row = |name: &str, age: Option<f64>, date: Option<&str>, city: Option<&str>, email: Option<&str>| {
        vec![
            CellValue::text(name),
            age.map_or(CellValue::Missing, CellValue::Number),
            CellValue::from(date),
            CellValue::from(city),
            CellValue::from(email),
        ]
    };
    Table::from_rows(
        headers,
        vec![
            row("alice smith", Some(30.0), Some("2024-01-05"), Some(" Oslo"), Some("alice@example.com")),
            row("alice smith", Some(30.0), Some("2024-01-05"), Some(" Oslo"), Some("alice@example.com")),
            row("BOB JONES", None, Some("01/07/2024"), Some("Bergen"), Some("bob@invalid")),
            row("carol white", Some(41.0), None, Some("bergen"), None),
            row("dan brown", Some(35.0), Some("2024-01-09"), None, Some("Dan@Example.com")),
            row("eve black", Some(400.0), Some("2024-01-10"), Some("Oslo"), Some("eve@example.com")),
        ],
    )
    .expect("table")
}

#[test]
fn cleans_a_realistic_table() {
    let (cleaned, audit, report) = run(customers()).expect("run");

    assert_eq!(
        cleaned.column_names(),
        vec!["full_name", "age", "signup_date", "city", "email"]
    );
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.cleaned_row_count, 5);
    assert_eq!(
        values_of(&cleaned, "full_name")[1],
        CellValue::text("Bob Jones")
    );
    assert_eq!(
        values_of(&cleaned, "age"),
        numbers(&[30.0, 38.0, 41.0, 35.0, 50.0]).as_slice()
    );
    assert_eq!(
        values_of(&cleaned, "signup_date")[1..3],
        [CellValue::text("2024-01-07"), CellValue::text("2024-01-07")]
    );
    assert_eq!(values_of(&cleaned, "city")[3], CellValue::text("oslo"));
    assert_eq!(values_of(&cleaned, "email")[3], CellValue::text("dan@example.com"));
    assert_eq!(report.outliers_clipped, 1);
    assert_eq!(report.invalid_values_flagged, 1);
    assert_eq!(report.overall_completeness_pct, 100.0);
    assert!(audit.iter().any(|entry| entry.kind == AuditKind::ModeTie));
    assert_eq!(
        audit.last().map(|entry| entry.stage),
        Some(Stage::ReportBuilder)
    );
}

#[test]
fn second_run_is_a_fixed_point() {
    let (first, _, first_report) = run(customers()).expect("first run");
    let (second, _, second_report) = run(first.clone()).expect("second run");

    assert_eq!(second, first);
    assert_eq!(second_report.duplicates_removed, 0);
    assert_eq!(second_report.outliers_clipped, 0);
    assert_eq!(second_report.values_imputed, 0);
    assert_eq!(
        second_report.overall_completeness_pct,
        first_report.overall_completeness_pct
    );
}

#[test]
fn derived_columns_are_added_on_request() {
    let options = CleaningOptions::default()
        .with_row_completeness(true)
        .with_email_validity(true);
    let (cleaned, _, report) = run_with_options(customers(), &options).expect("run");
    assert_eq!(
        cleaned.column_names(),
        vec![
            "full_name",
            "age",
            "signup_date",
            "city",
            "email",
            "email_valid",
            "row_completeness",
        ]
    );
    assert_eq!(
        values_of(&cleaned, "email_valid")[1],
        CellValue::Boolean(false)
    );
    assert_eq!(report.columns_processed, 7);
}

#[test]
fn date_named_text_columns_are_standardized() {
    let table = Table::new(vec![
        ids(3),
        Column::new(
            "Due Date",
            vec![
                CellValue::text("March 3, 2024"),
                CellValue::text("tbd"),
                CellValue::text("2024/03/09"),
            ],
        ),
    ])
    .expect("table");
    let (cleaned, audit, report) = run(table).expect("run");
    assert_eq!(
        values_of(&cleaned, "due_date"),
        &[
            CellValue::text("2024-03-03"),
            CellValue::text("tbd"),
            CellValue::text("2024-03-09"),
        ]
    );
    assert_eq!(report.date_standardization_failures, 1);
    assert!(audit.iter().any(|entry| {
        entry.kind == AuditKind::DateParseFailure && entry.row == Some(1)
    }));
}
