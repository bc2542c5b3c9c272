//! Cleaning pipeline for spreadsheet data.
//!
//! [`run`] takes a loaded [`Table`] through every stage and returns the
//! cleaned table, the ordered audit trail, and a [`QualityReport`]. The
//! crate performs no I/O and never logs; callers decide where the audit
//! entries go.

pub mod classify;
pub mod impute;
pub mod normalize;
pub mod outliers;
pub mod pipeline;
pub mod report;
pub mod standardize;
pub mod stats;
pub mod validate;

use dq_model::{AuditEntry, CleaningOptions, QualityReport, Result, Table};

pub use classify::{DateParser, classify_column, classify_table};
pub use normalize::canonical_name;
pub use pipeline::{
    CleanOutcome, CleaningPipeline, CleaningStage, StageContext, build_default_pipeline,
};
pub use report::build_report;

/// Clean `table` with the default options.
pub fn run(table: Table) -> Result<(Table, Vec<AuditEntry>, QualityReport)> {
    run_with_options(table, &CleaningOptions::default())
}

pub fn run_with_options(
    table: Table,
    options: &CleaningOptions,
) -> Result<(Table, Vec<AuditEntry>, QualityReport)> {
    build_default_pipeline()
        .run(table, options)
        .map(CleanOutcome::into_parts)
}
