//! Table loading for the data quality cleaner.
//!
//! CSV exports are read with Polars, workbooks (`.xlsx`, `.xls`, `.ods`, ...)
//! with calamine, and both are converted into a [`dq_model::Table`]. Empty
//! cells and common NaN spellings (`NA`, `#N/A`, `null`, ...) become the
//! missing marker.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dq_ingest::{IngestOptions, load_table};
//!
//! let table = load_table(Path::new("customers.csv"), &IngestOptions::default())?;
//! ```

mod error;
mod options;
mod reader;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Options ===
pub use options::{DEFAULT_MISSING_TOKENS, IngestOptions, MAX_CSV_FILE_SIZE};

// === CSV Reading ===
pub use reader::{check_file_size, frame_to_table, load_table, read_csv_frame, validate_encoding};

// === Workbook Reading ===
pub use workbook::{data_to_cell, range_to_table, read_workbook};
