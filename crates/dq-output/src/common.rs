//! Output paths shared by every writer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dq_model::SourceFormat;

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// `input` with `suffix` appended to the file stem and the extension
/// replaced by `extension` (or kept when `None`).
fn with_stem_suffix(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = extension
        .map(str::to_string)
        .or_else(|| {
            input
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
        });
    let file_name = match extension {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    };
    input.with_file_name(file_name)
}

/// `data/sales.csv` becomes `data/sales_cleaned.csv`. Workbooks get a CSV
/// sibling: `data/sales.xlsx` becomes `data/sales_cleaned.csv`.
pub fn default_output_path(input: &Path) -> PathBuf {
    match SourceFormat::from_path(input) {
        SourceFormat::Workbook => with_stem_suffix(input, "_cleaned", Some("csv")),
        SourceFormat::Csv => with_stem_suffix(input, "_cleaned", None),
    }
}

/// `data/sales.csv` becomes `data/sales_quality_report.json`.
pub fn default_report_path(input: &Path) -> PathBuf {
    with_stem_suffix(input, "_quality_report", Some("json"))
}

/// `data/sales.csv` becomes `data/sales_audit.json`.
pub fn default_audit_path(input: &Path) -> PathBuf {
    with_stem_suffix(input, "_audit", Some("json"))
}
