//! Cleaned table as CSV.

use std::path::Path;

use anyhow::{Context, Result, bail};
use dq_model::{SourceFormat, Table};

use crate::common::ensure_parent_dir;

/// Writes `table` with a header row. Missing cells are written empty.
///
/// Workbook paths are refused; a CSV behind an `.xlsx` name would not open.
pub fn write_table_csv(table: &Table, path: &Path) -> Result<()> {
    if SourceFormat::from_path(path) == SourceFormat::Workbook {
        bail!(
            "cannot write {}: the cleaned table is written as CSV, use a .csv path",
            path.display()
        );
    }
    ensure_parent_dir(path)?;
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(table.column_names())
        .with_context(|| format!("write header to {}", path.display()))?;
    for (idx, row) in table.rows().enumerate() {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .with_context(|| format!("write row {idx} to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "wrote cleaned table"
    );
    Ok(())
}
