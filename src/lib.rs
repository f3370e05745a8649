//! KuCoin Futures — authenticated REST client
//!
//! - Request signing (HMAC-SHA256, API key version 2)
//! - Active contract metadata and margin account balances
//! - Structured logging setup for binaries

pub mod adapters;
pub mod config;
pub mod error;

pub use error::AppError;
