//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Console output goes to stderr. When a log file is configured, a second
//! layer appends events to it with timestamps and without ANSI colors. The
//! file never records less than `info`, so every corrective action reaches it
//! whatever `-q`/`-v` does to the console.
//!
//! # Log Levels
//!
//! - `error`: fatal errors
//! - `warn`: audit warnings (unparseable dates, invalid emails, unresolved gaps)
//! - `info`: stage summaries, files read and written
//! - `debug`: per-column decisions (renames, classification, medians)
//! - `trace`: nothing yet
//!
//! Cell values only reach the logs with `--log-data`.

use std::cmp;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events follow the configured level. Everything else stays at
/// `warn` or quieter.
const OWN_CRATES: &[&str] = &["dq_cli", "dq_clean", "dq_ingest", "dq_model", "dq_output"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Console level.
    pub level_filter: LevelFilter,
    /// Least verbose level the log file accepts. The file uses the more
    /// verbose of this and `level_filter`.
    pub file_level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` on the console when it is set.
    pub use_env_filter: bool,
    /// Whether to include timestamps in console output. The file always has them.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors in console output.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Optional log file. Events are appended to it in addition to stderr.
    pub log_file: Option<PathBuf>,
    /// Whether cell values may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            file_level_filter: LevelFilter::INFO,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    /// Set log level directly. An explicit level ignores `RUST_LOG`.
    #[must_use]
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level_filter = level;
        self.use_env_filter = false;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}

/// Log file name used when `--log-file` is not given.
pub fn default_log_path() -> PathBuf {
    PathBuf::from(format!(
        "data_quality_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);

    let mut layers: Vec<BoxedLayer> = vec![console_layer(config, io::stderr)];
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        layers.push(file_layer(config, SharedFileWriter::new(file)));
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(io::Error::other)
}

fn console_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config);
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);

    match config.format {
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
        LogFormat::Compact => {
            let layer = layer.compact().with_ansi(config.with_ansi);
            if config.with_timestamps {
                layer.with_filter(filter).boxed()
            } else {
                layer.without_time().with_filter(filter).boxed()
            }
        }
        LogFormat::Pretty => {
            let layer = layer.with_ansi(config.with_ansi);
            if config.with_timestamps {
                layer.with_filter(filter).boxed()
            } else {
                layer.without_time().with_filter(filter).boxed()
            }
        }
    }
}

fn file_layer(config: &LogConfig, writer: SharedFileWriter) -> BoxedLayer {
    let level = cmp::max(config.level_filter, config.file_level_filter);
    let filter = EnvFilter::new(default_directives(level));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    match config.format {
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
        LogFormat::Compact | LogFormat::Pretty => layer.with_filter(filter).boxed(),
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(default_directives(config.level_filter))
}

/// Filter directives for `level`: our crates at `level`, dependencies no
/// louder than `warn`.
fn default_directives(level: LevelFilter) -> String {
    let own = level.to_string().to_lowercase();
    let external = cmp::min(level, LevelFilter::WARN).to_string().to_lowercase();
    let mut directives = vec![external];
    directives.extend(OWN_CRATES.iter().map(|krate| format!("{krate}={own}")));
    directives.join(",")
}
