//! Spreadsheet data quality cleaner CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use dq_cli::commands::{run_clean, run_profile};
use dq_cli::logging::{LogConfig, LogFormat, default_log_path, init_logging};
use dq_cli::types::CleanRequest;
use dq_output::default_audit_path;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{CleanArgs, Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_clean_summary, print_profile};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Clean(args) => match run_clean(&clean_request(args)) {
            Ok(result) => {
                print_clean_summary(&result);
                0
            }
            Err(error) => {
                tracing::error!("{error:#}");
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Profile(args) => match run_profile(&args.input, args.config.as_deref()) {
            Ok(result) => {
                print_profile(&result);
                0
            }
            Err(error) => {
                tracing::error!("{error:#}");
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn clean_request(args: CleanArgs) -> CleanRequest {
    let audit = args
        .audit
        .map(|path| path.unwrap_or_else(|| default_audit_path(&args.input)));
    CleanRequest {
        input: args.input,
        output: args.output,
        report: args.report,
        audit,
        config: args.config,
        row_completeness: args.row_completeness,
        email_flags: args.email_flags,
        dry_run: args.dry_run,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        ..LogConfig::default()
    };
    if let Some(level) = cli.log_level {
        config = config.with_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    }
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let log_file = if cli.no_log_file {
        None
    } else {
        Some(cli.log_file.clone().unwrap_or_else(default_log_path))
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
        .with_format(format)
        .with_log_file(log_file)
        .with_log_data(cli.log_data)
        .with_ansi(with_ansi)
}
