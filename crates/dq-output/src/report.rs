//! JSON artifacts: the quality report and the audit trail.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use dq_model::{AuditEntry, QualityReport};
use serde::Serialize;

use crate::common::ensure_parent_dir;

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("serialize {}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn write_report_json(report: &QualityReport, path: &Path) -> Result<()> {
    write_json(report, path)?;
    tracing::info!(path = %path.display(), "wrote quality report");
    Ok(())
}

pub fn write_audit_json(entries: &[AuditEntry], path: &Path) -> Result<()> {
    write_json(entries, path)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "wrote audit trail");
    Ok(())
}
