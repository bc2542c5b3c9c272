use std::path::PathBuf;

use dq_model::{AuditEntry, ColumnKind, QualityReport};

/// Everything `clean` needs, independent of how it was parsed.
#[derive(Debug, Clone, Default)]
pub struct CleanRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub audit: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub row_completeness: bool,
    pub email_flags: bool,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub report: QualityReport,
    /// Audit entries at warning severity or above.
    pub warnings: Vec<AuditEntry>,
    pub audit_entries: usize,
    pub outputs: OutputPaths,
}

/// Files written by a run. All `None` for a dry run.
#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    pub table: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub audit: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ProfileResult {
    pub input: PathBuf,
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub name: String,
    pub canonical: String,
    pub kind: ColumnKind,
    pub present: usize,
    pub missing: usize,
    pub completeness_pct: f64,
}
