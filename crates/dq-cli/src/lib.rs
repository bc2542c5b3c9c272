//! CLI library components for the data quality cleaner.

pub mod commands;
pub mod config;
pub mod logging;
pub mod sink;
pub mod types;
