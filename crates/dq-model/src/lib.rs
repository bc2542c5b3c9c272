//! Data model for the spreadsheet data quality cleaner.
//!
//! Everything the cleaning pipeline consumes or produces lives here: the
//! in-memory [`Table`], its [`CellValue`]s, the append-only [`AuditLog`], the
//! final [`QualityReport`], and the [`CleaningOptions`] that tune the policies.

pub mod audit;
pub mod cell;
pub mod error;
pub mod kind;
pub mod options;
pub mod report;
pub mod source;
pub mod table;

pub use audit::{AuditEntry, AuditKind, AuditLog, Severity, Stage, ValueChange};
pub use cell::{CellValue, format_numeric, parse_f64};
pub use error::{CleanError, Result};
pub use kind::ColumnKind;
pub use options::{CleaningOptions, DEFAULT_DATE_FORMATS};
pub use report::{QualityReport, TableSnapshot, completeness_pct, round_to};
pub use source::{SourceFormat, WORKBOOK_EXTENSIONS};
pub use table::{Column, Table};
