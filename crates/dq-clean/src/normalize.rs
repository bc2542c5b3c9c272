//! Structural normalization: canonical column names and exact-duplicate rows.

use std::collections::{BTreeMap, HashSet};

use dq_model::{AuditEntry, AuditKind, AuditLog, CleanError, Result, Severity, Stage, Table};

use crate::pipeline::{CleaningStage, StageContext};

/// Lowercase, with every run of non-alphanumeric characters collapsed into a
/// single underscore and no underscore at either end.
pub fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Canonical names for every column, in table order.
///
/// Names with no alphanumeric characters become `column_<n>` (1-based).
/// Fails on the first collision without touching the table.
pub fn canonical_names(table: &Table) -> Result<Vec<String>> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    let mut names = Vec::with_capacity(table.width());
    for (idx, column) in table.columns().iter().enumerate() {
        let mut canonical = canonical_name(&column.name);
        if canonical.is_empty() {
            canonical = format!("column_{}", idx + 1);
        }
        if let Some(first) = seen.insert(canonical.clone(), &column.name) {
            return Err(CleanError::ColumnNameCollision {
                canonical,
                first: first.to_string(),
                second: column.name.clone(),
            });
        }
        names.push(canonical);
    }
    Ok(names)
}

pub fn normalize_column_names(table: &mut Table, log: &mut AuditLog) -> Result<()> {
    let names = canonical_names(table)?;
    let renames: Vec<(String, String)> = table
        .columns()
        .iter()
        .zip(&names)
        .filter(|(column, canonical)| column.name != **canonical)
        .map(|(column, canonical)| (column.name.clone(), canonical.clone()))
        .collect();
    table.rename_columns(names)?;
    for (original, canonical) in renames {
        log.push(
            AuditEntry::new(
                Stage::StructuralNormalizer,
                AuditKind::ColumnRenamed,
                Severity::Debug,
                format!("renamed column '{original}' to '{canonical}'"),
            )
            .with_column(canonical)
            .with_affected(1),
        );
    }
    Ok(())
}

/// Drops rows whose cells all equal an earlier row, keeping the first.
///
/// Returns the number of rows removed.
pub fn remove_duplicates(table: &mut Table, log: &mut AuditLog) -> Result<usize> {
    let before = table.height();
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(before);
        table.rows().map(|row| seen.insert(row)).collect()
    };
    table.retain_rows(&keep)?;
    let removed = before - table.height();
    log.push(
        AuditEntry::new(
            Stage::StructuralNormalizer,
            AuditKind::DuplicatesRemoved,
            Severity::Info,
            format!("removed {removed} duplicate rows"),
        )
        .with_affected(removed),
    );
    Ok(removed)
}

pub struct NormalizeStage;

impl CleaningStage for NormalizeStage {
    fn execute(&self, table: &mut Table, _ctx: &StageContext, log: &mut AuditLog) -> Result<()> {
        normalize_column_names(table, log)?;
        remove_duplicates(table, log)?;
        Ok(())
    }

    fn stage(&self) -> Stage {
        Stage::StructuralNormalizer
    }
}
