use serde::{Deserialize, Serialize};

/// Cell contents that mean "no value" in common spreadsheet exports.
pub const DEFAULT_MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Trimmed cell contents that load as missing.
    pub missing_tokens: Vec<String>,
    /// Rows Polars looks at to infer column dtypes. `None` scans the whole
    /// file, so a column with late text loads as text instead of failing.
    pub infer_schema_length: Option<usize>,
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            missing_tokens: DEFAULT_MISSING_TOKENS
                .iter()
                .map(|token| (*token).to_string())
                .collect(),
            infer_schema_length: None,
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_missing_tokens(mut self, tokens: Vec<String>) -> Self {
        self.missing_tokens = tokens;
        self
    }

    #[must_use]
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }
}
