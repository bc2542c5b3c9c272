use thiserror::Error;

/// Fatal structural errors. Any of these aborts the pipeline before output is
/// written.
#[derive(Debug, Error, PartialEq)]
pub enum CleanError {
    #[error("table has no columns")]
    EmptyTable,
    #[error(
        "column names '{first}' and '{second}' both canonicalize to '{canonical}'"
    )]
    ColumnNameCollision {
        canonical: String,
        first: String,
        second: String,
    },
    #[error("column '{column}' has {found} values, expected {expected}")]
    RaggedTable {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },
    #[error("row mask has {found} entries, expected {expected}")]
    MaskLength { expected: usize, found: usize },
    #[error("invalid output date format '{format}'")]
    InvalidDateFormat { format: String },
    #[error("IQR multiplier must be a finite non-negative number, got {multiplier}")]
    InvalidIqrMultiplier { multiplier: f64 },
}

pub type Result<T> = std::result::Result<T, CleanError>;
