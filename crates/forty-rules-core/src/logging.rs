//! Logging facilities for Forty Rules.
//!
//! This module provides:
//! - Target names used by every crate in the workspace, for log filtering
//! - Subscriber installation for applications
//! - Performance spans for profiling hot paths
//!
//! # Tracing Integration
//!
//! The library crates only emit `tracing` events. Applications install a
//! subscriber once at startup:
//!
//! ```ignore
//! use forty_rules_core::logging::{self, LogConfig};
//!
//! logging::init(&LogConfig::to_file("/tmp/forty-rules.log"))?;
//! ```
//!
//! The filter honors `RUST_LOG`, e.g. `RUST_LOG=forty_rules::view=debug`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{CoreError, Result};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "forty_rules_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "forty_rules_core::signal";
    /// Performance spans.
    pub const PERF: &str = "forty_rules::perf";
}

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Append to a file. Used by full-screen surfaces that own the terminal.
    File(PathBuf),
    /// Write to standard error.
    Stderr,
}

/// Subscriber configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Where to write log lines.
    pub destination: LogDestination,
    /// Filter used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl LogConfig {
    /// Log to a file with the default filter.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: LogDestination::File(path.into()),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }

    /// Log to standard error with the default filter.
    pub fn stderr() -> Self {
        Self {
            destination: LogDestination::Stderr,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }

    /// Override the filter used when `RUST_LOG` is unset.
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }
}

/// Install the global `tracing` subscriber.
///
/// Fails if a subscriber is already installed or the log file cannot be opened.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .map_err(|e| CoreError::Logging(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match &config.destination {
        LogDestination::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| CoreError::Logging(e.to_string()))
        }
        LogDestination::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| CoreError::Logging(e.to_string())),
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| CoreError::Logging(format!("{}: {e}", parent.display())))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CoreError::Logging(format!("{}: {e}", path.display())))
}

/// A performance span guard for timing operations.
///
/// Enter it at the top of a synchronous block; the span closes when the guard
/// is dropped. Not for use across `.await` points.
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
