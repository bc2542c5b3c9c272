use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use dq_clean::{DateParser, canonical_name, classify_column, run_with_options};
use dq_ingest::load_table;
use dq_model::{AuditEntry, QualityReport, Severity, Table, completeness_pct};
use dq_output::{
    default_output_path, default_report_path, write_audit_json, write_report_json,
    write_table_csv,
};

use crate::config::AppConfig;
use crate::sink::emit_audit;
use crate::types::{CleanRequest, CleanResult, ColumnProfile, OutputPaths, ProfileResult};

/// Load, clean, log the audit trail, and write the artifacts.
pub fn run_clean(request: &CleanRequest) -> Result<CleanResult> {
    let span = info_span!("clean", input = %request.input.display());
    let _guard = span.enter();

    let mut config = AppConfig::load_or_default(request.config.as_deref())?;
    if request.row_completeness {
        config.cleaning.add_row_completeness = true;
    }
    if request.email_flags {
        config.cleaning.add_email_validity = true;
    }
    debug!(?config, "resolved configuration");

    let table = load_table(&request.input, &config.ingest)
        .with_context(|| format!("load {}", request.input.display()))?;
    let (cleaned, audit, report) =
        run_with_options(table, &config.cleaning).context("clean table")?;
    emit_audit(&audit);

    let outputs = if request.dry_run {
        info!("dry run, no files written");
        OutputPaths::default()
    } else {
        write_outputs(request, &cleaned, &audit, &report)?
    };

    info!(
        rows = report.cleaned_row_count,
        duplicates = report.duplicates_removed,
        imputed = report.values_imputed,
        clipped = report.outliers_clipped,
        completeness = report.overall_completeness_pct,
        "cleaning complete"
    );

    let warnings = audit
        .iter()
        .filter(|entry| entry.severity >= Severity::Warning)
        .cloned()
        .collect();
    Ok(CleanResult {
        input: request.input.clone(),
        rows: cleaned.height(),
        columns: cleaned
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        report,
        warnings,
        audit_entries: audit.len(),
        outputs,
    })
}

fn write_outputs(
    request: &CleanRequest,
    cleaned: &Table,
    audit: &[AuditEntry],
    report: &QualityReport,
) -> Result<OutputPaths> {
    let table_path = request
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&request.input));
    let report_path = request
        .report
        .clone()
        .unwrap_or_else(|| default_report_path(&request.input));

    write_table_csv(cleaned, &table_path).context("write cleaned table")?;
    write_report_json(report, &report_path).context("write quality report")?;
    if let Some(audit_path) = &request.audit {
        write_audit_json(audit, audit_path).context("write audit trail")?;
    }

    Ok(OutputPaths {
        table: Some(table_path),
        report: Some(report_path),
        audit: request.audit.clone(),
    })
}

/// Classify and measure every column without changing anything.
pub fn run_profile(input: &Path, config: Option<&Path>) -> Result<ProfileResult> {
    let span = info_span!("profile", input = %input.display());
    let _guard = span.enter();

    let config = AppConfig::load_or_default(config)?;
    let table = load_table(input, &config.ingest)
        .with_context(|| format!("load {}", input.display()))?;
    let dates = DateParser::new(&config.cleaning.date_formats);
    let precision = config.cleaning.completeness_precision;

    let columns = table
        .columns()
        .iter()
        .map(|column| {
            let present = column.present_count();
            ColumnProfile {
                name: column.name.clone(),
                canonical: canonical_name(&column.name),
                kind: classify_column(column, &dates),
                present,
                missing: column.missing_count(),
                completeness_pct: completeness_pct(present, column.len(), precision),
            }
        })
        .collect();

    Ok(ProfileResult {
        input: input.to_path_buf(),
        rows: table.height(),
        columns,
    })
}
