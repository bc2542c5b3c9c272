//! Error types for table loading.

use std::path::PathBuf;

use dq_model::CleanError;
use thiserror::Error;

/// Errors that can occur while loading a table. All of them are fatal: the
/// pipeline never starts.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// UTF-16 and other non UTF-8 exports.
    #[error("unsupported encoding {encoding} in {path}, save the sheet as UTF-8 CSV")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The file has no header row.
    #[error("no columns found in {path}")]
    NoColumns { path: PathBuf },

    // === Workbook Errors ===
    /// Failed to open or read a workbook sheet.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    // === Table Errors ===
    /// Failed to read a cell from the parsed frame.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// The parsed frame does not form a valid table.
    #[error(transparent)]
    Table(#[from] CleanError),
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
