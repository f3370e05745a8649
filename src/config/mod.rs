//! Configuration module
//!
//! This module provides:
//! - Logging configuration (`init_logging`)
//!
//! Exchange credentials live with their adapter (`adapters::kucoin::KucoinConfig`).

pub mod logging;

// Re-export logging functions
pub use logging::{init_logging, LogFormat};
