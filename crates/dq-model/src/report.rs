use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Summary of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub original_row_count: usize,
    pub cleaned_row_count: usize,
    pub duplicates_removed: usize,
    pub columns_processed: usize,
    /// Completeness of the input before any stage ran.
    pub original_completeness_pct: f64,
    pub overall_completeness_pct: f64,
    pub per_column_completeness_pct: BTreeMap<String, f64>,
    pub values_imputed: usize,
    pub outliers_clipped: usize,
    pub invalid_values_flagged: usize,
    pub date_standardization_failures: usize,
}

/// Counts captured before the first stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub row_count: usize,
    pub column_count: usize,
    pub missing_cells: usize,
}

impl TableSnapshot {
    pub fn capture(table: &Table) -> Self {
        Self {
            row_count: table.height(),
            column_count: table.width(),
            missing_cells: table.missing_cells(),
        }
    }

    pub fn total_cells(&self) -> usize {
        self.row_count * self.column_count
    }

    pub fn completeness_pct(&self, precision: u32) -> f64 {
        let total = self.total_cells();
        completeness_pct(total - self.missing_cells, total, precision)
    }
}

/// `present / total * 100`, rounded to `precision` decimals.
///
/// An empty set of cells has nothing missing and reports 100.
pub fn completeness_pct(present: usize, total: usize, precision: u32) -> f64 {
    if total == 0 {
        return 100.0;
    }
    round_to(present as f64 / total as f64 * 100.0, precision)
}

pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(12) as i32);
    (value * factor).round() / factor
}
