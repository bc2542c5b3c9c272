//! Spreadsheet file formats, told apart by extension.

use std::path::Path;

/// Extensions read as workbooks. Everything else is read as CSV.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            });
        if is_workbook {
            Self::Workbook
        } else {
            Self::Csv
        }
    }
}
