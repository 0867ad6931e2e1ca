//! FILENAME: app/src/logging.rs
// PURPOSE: Unified logging system for the application.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use log::LevelFilter;
use once_cell::sync::OnceCell;

use crate::config::LoggingConfig;
use crate::error::AppError;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Global sequence counter stamped on every log line.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Log file chosen at initialization (`None` means console only).
static LOG_PATH: OnceCell<Option<PathBuf>> = OnceCell::new();

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Formats one log line: `seq|level|category|message`.
pub fn format_line(seq: u64, level: log::Level, category: &str, message: &str) -> String {
    format!("{}|{}|{}|{}", seq, level_code(level), category, message)
}

fn level_code(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "E",
        log::Level::Warn => "W",
        log::Level::Info => "I",
        log::Level::Debug => "D",
        log::Level::Trace => "T",
    }
}

fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Installs the process-wide logger. Later calls are no-ops and return the
/// path chosen by the first call. Returns `None` when logging goes to the
/// console or another logger was installed first.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<PathBuf>, AppError> {
    let path = LOG_PATH.get_or_try_init(|| -> Result<Option<PathBuf>, AppError> {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(parse_level(&config.level));
        builder.format(|buf, record| {
            let line = format_line(
                next_seq(),
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
            writeln!(buf, "{}", line)
        });

        if let Some(path) = &config.file {
            let file = OpenOptions::new().append(true).create(true).open(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        if builder.try_init().is_err() {
            // Another logger (e.g. a test harness) owns the output.
            log::warn!(target: "SYS", "logger already installed, ignoring log file {:?}", config.file);
            return Ok(None);
        }
        Ok(config.file.clone())
    })?;

    Ok(path.clone())
}

/// The log file in use, if logging was initialized with one.
pub fn get_log_path() -> Option<PathBuf> {
    LOG_PATH.get().cloned().flatten()
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        ::log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        ::log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        ::log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        ::log::error!(target: $cat, $($arg)*)
    };
}
