//! CLI argument definitions for the data quality cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "data-quality",
    version,
    about = "Spreadsheet data quality cleaner",
    long_about = "Clean a spreadsheet export and report on its quality.\n\n\
                  Normalizes column names, removes duplicate rows, imputes missing values,\n\
                  clips outliers, standardizes dates and text, and validates emails.\n\
                  Every change is recorded in an audit trail."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Log file path (default: data_quality_<timestamp>.log in the working directory).
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Only log to the console.
    #[arg(long = "no-log-file", global = true, conflicts_with = "log_file")]
    pub no_log_file: bool,

    /// Include cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a spreadsheet export and write the cleaned copy plus a quality report.
    Clean(CleanArgs),

    /// Show column types and completeness without changing anything.
    Profile(ProfileArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// CSV export of the spreadsheet to clean.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Cleaned CSV path (default: <INPUT stem>_cleaned.<ext>).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Quality report JSON path (default: <INPUT stem>_quality_report.json).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Also write the audit trail as JSON (default: <INPUT stem>_audit.json).
    #[arg(long = "audit", value_name = "PATH", num_args = 0..=1)]
    pub audit: Option<Option<PathBuf>>,

    /// TOML file with cleaning and ingest options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append a row_completeness column to the cleaned table.
    #[arg(long = "row-completeness")]
    pub row_completeness: bool,

    /// Append a <column>_valid column for every email column.
    #[arg(long = "email-flags")]
    pub email_flags: bool,

    /// Clean and report without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// CSV export of the spreadsheet to profile.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML file with cleaning and ingest options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
