//! Logging setup for the flespi provider
//!
//! Library crates log through `tracing` macros. The process hosting the
//! provider calls [`init`] once to install a subscriber configured from the
//! environment.
//!
//! # Environment Variables
//!
//! - `FLESPI_DEBUG=1` - Shorthand for `FLESPI_LOG_LEVEL=debug`
//! - `FLESPI_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `FLESPI_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `RUST_LOG` - Full `EnvFilter` directive, wins over `FLESPI_LOG_LEVEL`
//!
//! # Usage
//!
//! ```rust,no_run
//! flespi_log::init();
//! tracing::info!(resource = "flespi_webhook", "provider configured");
//! ```

use std::env;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// No logging
    Off,
}

impl Level {
    /// Parse a level name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Directive understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line, human oriented
    Pretty,
    /// Single-line
    Compact,
    /// One JSON object per line
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub format: Format,
    /// Include the event target (module path)
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Json,
            target: true,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = lookup("FLESPI_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let level = lookup("FLESPI_LOG_LEVEL")
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("FLESPI_LOG_FORMAT")
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Json);

        let target = lookup("FLESPI_LOG_TARGET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Self {
            level,
            format,
            target,
        }
    }

    /// Build the event filter. `RUST_LOG` takes precedence when set.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_directive()))
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Subscriber installation failed.
#[derive(Debug, Error)]
#[error("Failed to install log subscriber: {0}")]
pub struct InitError(String);

/// Install a global subscriber configured from the environment.
///
/// Does nothing if a subscriber is already installed.
pub fn init() {
    let _ = try_init();
}

/// Install a global subscriber configured from the environment.
pub fn try_init() -> Result<(), InitError> {
    try_init_with(&LogConfig::from_env())
}

/// Install a global subscriber with an explicit configuration.
pub fn try_init_with(config: &LogConfig) -> Result<(), InitError> {
    let registry = tracing_subscriber::registry().with(config.filter());

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.target);

    let result = match config.format {
        Format::Pretty => registry.with(fmt.pretty()).try_init(),
        Format::Compact => registry.with(fmt.compact()).try_init(),
        Format::Json => registry.with(fmt.json()).try_init(),
    };

    result.map_err(|e| InitError(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
