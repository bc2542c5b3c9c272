//! Writers for everything a cleaning run produces.

mod common;
mod report;
mod table;

pub use common::{default_audit_path, default_output_path, default_report_path, ensure_parent_dir};
pub use report::{write_audit_json, write_report_json};
pub use table::write_table_csv;
