//! TOML configuration for the CLI.
//!
//! ```toml
//! [cleaning]
//! iqr_multiplier = 3.0
//! output_date_format = "%d/%m/%Y"
//!
//! [ingest]
//! missing_tokens = ["", "n/a", "-"]
//! ```
//!
//! Every key is optional. Command line flags are applied on top.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dq_ingest::IngestOptions;
use dq_model::CleaningOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cleaning: CleaningOptions,
    pub ingest: IngestOptions,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("load config {}", path.display()))
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
