//! Shared utilities for the data quality crates.
//!
//! This crate bridges Polars values into the [`dq_model::CellValue`] model.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use self::polars::{any_to_cell, any_to_f64, any_to_string, is_missing_token};
