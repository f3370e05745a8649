//! Logging configuration module
//!
//! Provides configurable JSON/Pretty logging output, optionally mirrored to a file
//!
//! # Usage
//! ```no_run
//! use kucoin_futures::config::logging::init_logging;
//! init_logging().expect("logging already initialized");
//! ```
//!
//! # Environment Variables
//! - `LOG_FORMAT`: Output format - `json` (default) or `pretty`
//! - `RUST_LOG`: Log level filter (default: `info`)
//! - `LOG_FILE`: Optional path; records are also appended there as plain text

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::error::{AppError, Result};

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Anything other than `pretty` falls back to JSON
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Initialize logging with configurable format
///
/// Reads `LOG_FORMAT` from environment:
/// - `json` (default): Machine-parseable JSON output for production
/// - `pretty`: Human-readable output for development
///
/// Also respects `RUST_LOG` for log level filtering (default: `info`).
/// When `LOG_FILE` is set, the file is opened in append mode.
pub fn init_logging() -> Result<()> {
    let format = LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    match format {
        LogFormat::Pretty => layers.push(fmt::layer().pretty().boxed()),
        LogFormat::Json => layers.push(fmt::layer().json().boxed()),
    }

    if let Some(path) = std::env::var("LOG_FILE").ok().filter(|p| !p.is_empty()) {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| AppError::Config(format!("logging init failed: {}", e)))
}
