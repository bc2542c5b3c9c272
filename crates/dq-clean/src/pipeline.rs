//! Ordered cleaning pipeline.
//!
//! Each stage implements [`CleaningStage`] and runs in order over one table,
//! appending to one audit log.
//!
//! # Standard Pipeline Order
//!
//! 1. **NormalizeStage** - canonical column names, exact-duplicate removal
//! 2. **ClassifyStage** - record each column's type
//! 3. **ImputeStage** - fill missing values per column type
//! 4. **OutlierStage** - clip numeric values to IQR bounds
//! 5. **StandardizeStage** - canonical dates, text case
//! 6. **ValidateStage** - email checks, row completeness
//!
//! The report is built after the last stage from a snapshot taken before the
//! first.

use dq_model::{
    AuditEntry, AuditKind, AuditLog, CleanError, CleaningOptions, QualityReport, Result, Severity,
    Stage, Table, TableSnapshot,
};

use crate::classify::{ClassifyStage, DateParser};
use crate::impute::ImputeStage;
use crate::normalize::NormalizeStage;
use crate::outliers::OutlierStage;
use crate::report::build_report;
use crate::standardize::StandardizeStage;
use crate::validate::ValidateStage;

/// A single stage of the cleaning pipeline.
pub trait CleaningStage: Send + Sync {
    /// Transform `table` in place, recording every action in `log`.
    fn execute(&self, table: &mut Table, ctx: &StageContext, log: &mut AuditLog) -> Result<()>;

    /// Which stage this is, for audit entries and step listings.
    fn stage(&self) -> Stage;

    /// Default implementation always runs the stage.
    fn should_skip(&self, _table: &Table, _ctx: &StageContext) -> bool {
        false
    }
}

/// Read-only state shared by every stage of one run.
#[derive(Debug, Clone)]
pub struct StageContext {
    pub options: CleaningOptions,
    pub dates: DateParser,
}

impl StageContext {
    pub fn new(options: CleaningOptions) -> Self {
        let dates = DateParser::new(&options.date_formats);
        Self { options, dates }
    }
}

impl Default for StageContext {
    fn default() -> Self {
        Self::new(CleaningOptions::default())
    }
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub table: Table,
    pub audit: Vec<AuditEntry>,
    pub report: QualityReport,
}

impl CleanOutcome {
    pub fn into_parts(self) -> (Table, Vec<AuditEntry>, QualityReport) {
        (self.table, self.audit, self.report)
    }
}

pub struct CleaningPipeline {
    stages: Vec<Box<dyn CleaningStage>>,
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CleaningPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Add a stage to the end of the pipeline.
    #[must_use]
    pub fn add_stage(mut self, stage: Box<dyn CleaningStage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.stage().as_str()).collect()
    }

    /// Run every stage over `table`, then build the report.
    ///
    /// The table is consumed so a failed run leaves nothing half-cleaned
    /// behind.
    pub fn run(&self, mut table: Table, options: &CleaningOptions) -> Result<CleanOutcome> {
        if table.width() == 0 {
            return Err(CleanError::EmptyTable);
        }
        options.validate()?;
        let ctx = StageContext::new(options.clone());
        let before = TableSnapshot::capture(&table);
        let mut log = AuditLog::new();

        for stage in &self.stages {
            if stage.should_skip(&table, &ctx) {
                continue;
            }
            stage.execute(&mut table, &ctx, &mut log)?;
        }

        let report = build_report(&before, &table, &log, &ctx.options);
        log.push(AuditEntry::new(
            Stage::ReportBuilder,
            AuditKind::ReportBuilt,
            Severity::Info,
            format!(
                "{} of {} rows kept, completeness {}% -> {}%",
                report.cleaned_row_count,
                report.original_row_count,
                report.original_completeness_pct,
                report.overall_completeness_pct
            ),
        ));

        Ok(CleanOutcome {
            table,
            audit: log.into_entries(),
            report,
        })
    }
}

/// The standard six-stage pipeline.
pub fn build_default_pipeline() -> CleaningPipeline {
    CleaningPipeline::new()
        .add_stage(Box::new(NormalizeStage))
        .add_stage(Box::new(ClassifyStage))
        .add_stage(Box::new(ImputeStage))
        .add_stage(Box::new(OutlierStage))
        .add_stage(Box::new(StandardizeStage))
        .add_stage(Box::new(ValidateStage))
}
