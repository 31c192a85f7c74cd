//! Logging infrastructure for the coin-selection engine
//!
//! Thin configuration layer over the `log` facade with an `env_logger`
//! backend. Selection code only ever logs shape counts, satoshi totals, and
//! strategy names; caller identifiers are opaque integers, so nothing
//! sensitive can leak through log output.
//!
//! # Usage
//!
//! ```
//! use coinpick_core::logging::{self, LogConfig};
//!
//! // Initialize logging with default configuration
//! logging::init(&LogConfig::default()).expect("Failed to initialize logging");
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::sync::Once;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// Error conditions
    Error,
    /// Warning conditions
    Warn,
    /// Informational messages
    Info,
    /// Debug-level messages
    Debug,
    /// Trace level (very verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Configuration for the logging system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log level
    pub level: LogLevel,
    /// Whether to include timestamps in log messages
    pub include_timestamps: bool,
    /// Whether to log to console at all
    pub console_logging: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            include_timestamps: true,
            console_logging: true,
        }
    }
}

// Ensure logging is only initialized once
static LOGGING_INIT: Once = Once::new();

/// Initialize the logging system with the given configuration
///
/// Safe to call multiple times - only the first call installs a logger,
/// subsequent calls return Ok without touching the configuration.
///
/// # Arguments
/// * `config` - Configuration for the logging system
///
/// # Returns
/// * Result with () on success, error string on failure
pub fn init(config: &LogConfig) -> Result<(), String> {
    let mut result = Ok(());
    LOGGING_INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        let filter = if config.console_logging {
            config.level.into()
        } else {
            LevelFilter::Off
        };
        builder.filter_level(filter);
        if !config.include_timestamps {
            builder.format_timestamp(None);
        }
        result = builder
            .try_init()
            .map_err(|e| format!("Failed to initialize logging: {}", e));
    });
    result
}
